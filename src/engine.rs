use crate::classifier::{BrickClassifier, Classification, Variant};
use crate::config::RenkoConfig;
use crate::error::{RenkoError, Result};
use crate::model::brick::Brick;
use crate::model::quote::{Quote, QuoteTime};
use crate::performance::{self, PerformanceRecord};
use crate::snapshot::{Snapshot, SnapshotFormat};
use crate::store::BrickStore;

/// Incremental Renko builder for one ordered quote stream.
///
/// The first quote seeds brick 0; every later quote either extends the open
/// (last) brick or appends one or more bricks chosen by the configured
/// classifier.
#[derive(Debug, Clone)]
pub struct RenkoEngine {
    name: Option<String>,
    brick_size: f64,
    classifier: BrickClassifier,
    store: BrickStore,
}

impl RenkoEngine {
    pub fn new(config: &RenkoConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            name = ?config.name,
            brick_size = config.brick_size,
            variant = %config.variant,
            initial_capacity = config.initial_capacity,
            "Renko engine created"
        );
        Ok(Self {
            name: config.name.clone(),
            brick_size: config.brick_size,
            classifier: BrickClassifier::new(
                config.variant,
                config.brick_size,
                config.grid_price_mode,
            ),
            store: BrickStore::new(config.initial_capacity, config.growth_pct),
        })
    }

    /// Feed a batch of quotes and return how many bricks were appended.
    ///
    /// `dates` and `volumes`, when given, must match `prices` in length. A
    /// quote that fails validation stops the batch; quotes before it stay
    /// committed.
    pub fn ingest(
        &mut self,
        prices: &[f64],
        dates: Option<&[Option<QuoteTime>]>,
        volumes: Option<&[Option<f64>]>,
    ) -> Result<usize> {
        if let Some(dates) = dates {
            check_len("dates", prices.len(), dates.len())?;
        }
        if let Some(volumes) = volumes {
            check_len("volumes", prices.len(), volumes.len())?;
        }

        let mut emitted = 0;
        for (index, &price) in prices.iter().enumerate() {
            let time = match dates.and_then(|d| d[index].as_ref()) {
                Some(date) => Some(normalize(index, date)?),
                None => None,
            };
            let quote = Quote {
                price,
                time,
                volume: volumes.and_then(|v| v[index]),
            };
            emitted += self.apply(index, quote)?;
        }
        Ok(emitted)
    }

    /// Feed a single, already-normalized quote.
    pub fn push(&mut self, quote: Quote) -> Result<usize> {
        self.apply(0, quote)
    }

    fn apply(&mut self, index: usize, quote: Quote) -> Result<usize> {
        if !quote.price.is_finite() {
            tracing::warn!(index, price = quote.price, "Rejected non-finite price");
            return Err(RenkoError::NonFinitePrice {
                index,
                price: quote.price,
            });
        }

        let Some(last) = self.store.last().copied() else {
            let seed = self.classifier.seed(&quote);
            if seed.lower_bound >= seed.upper_bound {
                tracing::warn!(
                    index,
                    price = quote.price,
                    brick_size = self.brick_size,
                    "Rejected seed with collapsed bounds"
                );
                return Err(RenkoError::UnresolvablePrice {
                    index,
                    price: quote.price,
                    brick_size: self.brick_size,
                });
            }
            self.store.append(seed);
            return Ok(1);
        };

        if last.contains(quote.price) {
            self.extend_open(&quote);
            return Ok(0);
        }

        if let (Some(open), Some(time)) = (self.store.last_mut(), quote.time) {
            open.end_time = Some(time);
        }

        match self.classifier.classify(&last, &quote) {
            Classification::Extend => {
                self.extend_open(&quote);
                Ok(0)
            }
            Classification::NewBricks(bricks) => {
                let emitted = bricks.len();
                for brick in bricks {
                    self.store.append(brick);
                }
                Ok(emitted)
            }
        }
    }

    fn extend_open(&mut self, quote: &Quote) {
        if let Some(open) = self.store.last_mut() {
            open.absorb(quote);
        }
    }

    pub fn snapshot(&self, format: SnapshotFormat) -> Snapshot {
        Snapshot::build(self.store.active_slice(), format)
    }

    pub fn score(&self) -> PerformanceRecord {
        performance::score(self.store.active_slice())
    }

    pub fn bricks(&self) -> &[Brick] {
        self.store.active_slice()
    }

    pub fn last_brick(&self) -> Option<&Brick> {
        self.store.last()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn brick_size(&self) -> f64 {
        self.brick_size
    }

    pub fn variant(&self) -> Variant {
        self.classifier.variant()
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RenkoError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn normalize(index: usize, date: &QuoteTime) -> Result<f64> {
    date.to_timestamp().ok_or_else(|| {
        tracing::warn!(index, date = ?date, "Unsupported quote timestamp");
        RenkoError::UnsupportedTimestamp {
            index,
            value: format!("{:?}", date),
        }
    })
}
