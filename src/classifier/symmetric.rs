use crate::model::brick::{Brick, Trend};
use crate::model::quote::Quote;

/// Steps the reference one brick size in either direction; bounds always span
/// `reference ± brick_size`.
#[derive(Debug, Clone)]
pub struct SymmetricClassifier {
    brick_size: f64,
}

impl SymmetricClassifier {
    pub fn new(brick_size: f64) -> Self {
        Self { brick_size }
    }

    pub fn seed(&self, quote: &Quote) -> Brick {
        super::centered_seed(quote, self.brick_size)
    }

    pub fn step(&self, reference: &Brick, quote: &Quote) -> Option<Brick> {
        let size = self.brick_size;
        let (renko, trend) = if quote.price >= reference.upper_bound {
            (reference.renko_price + size, Trend::Up)
        } else if quote.price <= reference.lower_bound {
            (reference.renko_price - size, Trend::Down)
        } else {
            return None;
        };
        Some(Brick::bridging(quote, renko, renko - size, renko + size, trend))
    }
}
