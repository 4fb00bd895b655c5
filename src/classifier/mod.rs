pub mod grid;
pub mod standard;
pub mod symmetric;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenkoError;
use crate::model::brick::Brick;
use crate::model::quote::Quote;

pub use grid::GridClassifier;
pub use standard::StandardClassifier;
pub use symmetric::SymmetricClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Symmetric,
    Grid,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Symmetric => "symmetric",
            Variant::Grid => "grid",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = RenkoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Variant::Standard),
            "symmetric" => Ok(Variant::Symmetric),
            "grid" => Ok(Variant::Grid),
            other => Err(RenkoError::Config(format!(
                "unknown variant '{}', expected one of standard/symmetric/grid",
                other
            ))),
        }
    }
}

/// Representative price of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPriceMode {
    #[default]
    Avg,
    Min,
    Max,
}

impl FromStr for GridPriceMode {
    type Err = RenkoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg" => Ok(GridPriceMode::Avg),
            "min" => Ok(GridPriceMode::Min),
            "max" => Ok(GridPriceMode::Max),
            other => Err(RenkoError::Config(format!(
                "unknown grid price mode '{}', expected one of avg/min/max",
                other
            ))),
        }
    }
}

/// Outcome of classifying a quote against the open brick.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The quote belongs to the open brick.
    Extend,
    /// Bricks to append, in order. The last one holds the quote.
    NewBricks(Vec<Brick>),
}

#[derive(Debug, Clone)]
pub enum BrickClassifier {
    Standard(StandardClassifier),
    Symmetric(SymmetricClassifier),
    Grid(GridClassifier),
}

impl BrickClassifier {
    /// `brick_size` must already be validated as finite and positive.
    pub fn new(variant: Variant, brick_size: f64, grid_price_mode: GridPriceMode) -> Self {
        match variant {
            Variant::Standard => Self::Standard(StandardClassifier::new(brick_size)),
            Variant::Symmetric => Self::Symmetric(SymmetricClassifier::new(brick_size)),
            Variant::Grid => Self::Grid(GridClassifier::new(brick_size, grid_price_mode)),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Self::Standard(_) => Variant::Standard,
            Self::Symmetric(_) => Variant::Symmetric,
            Self::Grid(_) => Variant::Grid,
        }
    }

    pub fn seed(&self, quote: &Quote) -> Brick {
        match self {
            Self::Standard(c) => c.seed(quote),
            Self::Symmetric(c) => c.seed(quote),
            Self::Grid(c) => c.seed(quote),
        }
    }

    pub fn classify(&self, last: &Brick, quote: &Quote) -> Classification {
        match self {
            Self::Standard(c) => bridge(last, quote, |reference| c.step(reference, quote)),
            Self::Symmetric(c) => bridge(last, quote, |reference| c.step(reference, quote)),
            Self::Grid(c) => bridge(last, quote, |reference| c.step(reference, quote)),
        }
    }
}

/// Seed bounds shared by the reference-stepping variants.
fn centered_seed(quote: &Quote, brick_size: f64) -> Brick {
    Brick::seed(
        quote,
        quote.price,
        quote.price - brick_size,
        quote.price + brick_size,
    )
}

/// Applies `step` repeatedly, each produced brick becoming the reference for
/// the next, until the quote settles. A step that does not move the bounds
/// ends the walk, so float absorption at extreme magnitudes cannot spin.
fn bridge<F>(last: &Brick, quote: &Quote, mut step: F) -> Classification
where
    F: FnMut(&Brick) -> Option<Brick>,
{
    let mut bricks: Vec<Brick> = Vec::new();
    let mut reference = *last;
    while let Some(next) = step(&reference) {
        let stalled =
            next.lower_bound == reference.lower_bound && next.upper_bound == reference.upper_bound;
        if stalled && !bricks.is_empty() {
            break;
        }
        bricks.push(next);
        reference = next;
        if stalled {
            break;
        }
    }

    match bricks.last_mut() {
        Some(landing) => {
            landing.land(quote);
            tracing::trace!(
                price = quote.price,
                emitted = bricks.len(),
                "Quote breached the open brick"
            );
            Classification::NewBricks(bricks)
        }
        None => Classification::Extend,
    }
}
