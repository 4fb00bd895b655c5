use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenkoError;
use crate::model::brick::{Brick, COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Fixed-width numeric rows in `COLUMN_NAMES` order.
    #[default]
    Raw,
    /// One named record per brick.
    Labeled,
}

impl FromStr for SnapshotFormat {
    type Err = RenkoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(SnapshotFormat::Raw),
            "labeled" | "labelled" => Ok(SnapshotFormat::Labeled),
            other => Err(RenkoError::Config(format!(
                "unknown snapshot format '{}', expected raw or labeled",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledBrick {
    pub index: usize,
    pub last_price: f64,
    pub renko_price: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub trend: i8,
    pub volume: Option<f64>,
    pub count: u64,
    pub consecutive_up: u32,
    pub consecutive_down: u32,
}

impl LabeledBrick {
    fn from_brick(index: usize, brick: &Brick) -> Self {
        Self {
            index,
            last_price: brick.last_price,
            renko_price: brick.renko_price,
            lower_bound: brick.lower_bound,
            upper_bound: brick.upper_bound,
            start_time: brick.start_time,
            end_time: brick.end_time,
            trend: brick.trend.as_i8(),
            volume: brick.volume,
            count: brick.count,
            consecutive_up: brick.consecutive_up,
            consecutive_down: brick.consecutive_down,
        }
    }
}

/// Copy of the active bricks in the requested shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Raw(Vec<[f64; COLUMNS]>),
    Labeled(Vec<LabeledBrick>),
}

impl Snapshot {
    pub fn build(bricks: &[Brick], format: SnapshotFormat) -> Self {
        match format {
            SnapshotFormat::Raw => Snapshot::Raw(bricks.iter().map(Brick::to_row).collect()),
            SnapshotFormat::Labeled => Snapshot::Labeled(
                bricks
                    .iter()
                    .enumerate()
                    .map(|(i, b)| LabeledBrick::from_brick(i, b))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Raw(rows) => rows.len(),
            Snapshot::Labeled(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
