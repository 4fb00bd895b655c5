use super::GridPriceMode;
use crate::model::brick::{Brick, Trend};
use crate::model::quote::Quote;

/// Fixed price grid: cell `k` spans `[k * size, (k + 1) * size)` regardless of
/// history, and trend follows the direction of the cell index.
#[derive(Debug, Clone)]
pub struct GridClassifier {
    brick_size: f64,
    price_mode: GridPriceMode,
}

impl GridClassifier {
    pub fn new(brick_size: f64, price_mode: GridPriceMode) -> Self {
        Self {
            brick_size,
            price_mode,
        }
    }

    pub fn cell_of(&self, price: f64) -> i64 {
        (price / self.brick_size).floor() as i64
    }

    /// Both edges are derived from the cell index. Past the float resolution
    /// of the brick size adjacent cells share an edge and `lower == upper`.
    pub fn cell_bounds(&self, cell: i64) -> (f64, f64) {
        (
            cell as f64 * self.brick_size,
            (cell + 1) as f64 * self.brick_size,
        )
    }

    fn cell_price(&self, lower: f64, upper: f64) -> f64 {
        match self.price_mode {
            GridPriceMode::Avg => lower + (upper - lower) / 2.0,
            GridPriceMode::Min => lower,
            GridPriceMode::Max => upper,
        }
    }

    /// Bricks carry their cell only through the lower bound.
    fn cell_of_brick(&self, brick: &Brick) -> i64 {
        (brick.lower_bound / self.brick_size).round() as i64
    }

    pub fn seed(&self, quote: &Quote) -> Brick {
        let (lower, upper) = self.cell_bounds(self.cell_of(quote.price));
        Brick::seed(quote, self.cell_price(lower, upper), lower, upper)
    }

    /// Moves one cell toward the quote's cell, or `None` when already there.
    pub fn step(&self, reference: &Brick, quote: &Quote) -> Option<Brick> {
        let current = self.cell_of_brick(reference);
        let target = self.cell_of(quote.price);
        let (next, trend) = match target.cmp(&current) {
            std::cmp::Ordering::Equal => return None,
            std::cmp::Ordering::Greater => (current + 1, Trend::Up),
            std::cmp::Ordering::Less => (current - 1, Trend::Down),
        };
        let (lower, upper) = self.cell_bounds(next);
        if lower >= upper {
            return None;
        }
        Some(Brick::bridging(
            quote,
            self.cell_price(lower, upper),
            lower,
            upper,
            trend,
        ))
    }
}
