use serde::Serialize;

use crate::model::brick::Brick;

/// Summary statistics of a finished brick sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceRecord {
    /// Underlying quotes absorbed by all bricks.
    pub count: u64,
    pub renko_bricks: usize,
    /// Average quotes per brick; 0 when there are no bricks.
    pub price_to_brick_ratio: f64,
    pub sign_changes: usize,
    /// +1 for each interior brick that keeps the trend, -2 for each flip.
    pub balance: i64,
    /// `ln(raw + 1) * ln(ratio)`, or -1.0 for degenerate sequences.
    pub score: f64,
}

pub fn score(bricks: &[Brick]) -> PerformanceRecord {
    let count: u64 = bricks.iter().map(|b| b.count).sum();
    let renko_bricks = bricks.len();
    let price_to_brick_ratio = if renko_bricks > 0 {
        count as f64 / renko_bricks as f64
    } else {
        0.0
    };

    let sign_changes = sign_changes(bricks);
    let balance = balance(bricks);

    let raw = if sign_changes == 0 {
        balance as f64
    } else {
        balance as f64 / sign_changes as f64
    };

    let score = if raw >= 0.0 && price_to_brick_ratio >= 1.0 {
        (raw + 1.0).ln() * price_to_brick_ratio.ln()
    } else {
        -1.0
    };

    PerformanceRecord {
        count,
        renko_bricks,
        price_to_brick_ratio,
        sign_changes,
        balance,
        score,
    }
}

/// Trend transitions, discounting the seed brick and the first directional
/// brick. The first brick has no predecessor and counts as a transition.
fn sign_changes(bricks: &[Brick]) -> usize {
    if bricks.is_empty() {
        return 0;
    }
    let transitions = 1 + bricks
        .windows(2)
        .filter(|pair| pair[0].trend != pair[1].trend)
        .count();
    transitions.saturating_sub(2)
}

fn balance(bricks: &[Brick]) -> i64 {
    bricks
        .windows(2)
        .skip(1)
        .map(|pair| if pair[1].trend == pair[0].trend { 1 } else { -2 })
        .sum()
}
