//! Incremental Renko brick construction.
//!
//! [`engine::RenkoEngine`] turns a time-ordered price stream into fixed-size
//! price bricks, using one of the [`classifier::Variant`] policies, and scores
//! the resulting sequence with [`performance::score`].

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod performance;
pub mod snapshot;
pub mod store;

pub use classifier::{GridPriceMode, Variant};
pub use config::RenkoConfig;
pub use engine::RenkoEngine;
pub use error::{RenkoError, Result};
pub use model::brick::{Brick, Trend};
pub use model::quote::{Quote, QuoteTime};
pub use performance::PerformanceRecord;
pub use snapshot::{Snapshot, SnapshotFormat};
