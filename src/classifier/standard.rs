use crate::model::brick::{Brick, Trend};
use crate::model::quote::Quote;

/// Classic Renko: a reversal has to travel two brick sizes from the last
/// reference, so a new brick never overlaps the bounds of the previous trend.
#[derive(Debug, Clone)]
pub struct StandardClassifier {
    brick_size: f64,
}

impl StandardClassifier {
    pub fn new(brick_size: f64) -> Self {
        Self { brick_size }
    }

    pub fn seed(&self, quote: &Quote) -> Brick {
        super::centered_seed(quote, self.brick_size)
    }

    /// Next brick toward `quote`, or `None` once the quote is strictly inside
    /// `reference`.
    pub fn step(&self, reference: &Brick, quote: &Quote) -> Option<Brick> {
        let size = self.brick_size;
        if quote.price >= reference.upper_bound {
            let (multiplier, up) = if reference.trend == Trend::Down {
                (2.0, 1)
            } else {
                (1.0, reference.consecutive_up + 1)
            };
            let renko = reference.renko_price + multiplier * size;
            Some(
                Brick::bridging(quote, renko, renko - 2.0 * size, renko + size, Trend::Up)
                    .with_streak(up, 0),
            )
        } else if quote.price <= reference.lower_bound {
            let (multiplier, down) = if reference.trend == Trend::Up {
                (2.0, 1)
            } else {
                (1.0, reference.consecutive_down + 1)
            };
            let renko = reference.renko_price - multiplier * size;
            Some(
                Brick::bridging(quote, renko, renko - size, renko + 2.0 * size, Trend::Down)
                    .with_streak(0, down),
            )
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_steps_one_brick() {
        let c = StandardClassifier::new(10.0);
        let seed = c.seed(&Quote::new(95.0));
        let next = c.step(&seed, &Quote::new(105.0)).unwrap();
        assert!((next.renko_price - 105.0).abs() < f64::EPSILON);
        assert!((next.lower_bound - 85.0).abs() < f64::EPSILON);
        assert!((next.upper_bound - 115.0).abs() < f64::EPSILON);
        assert_eq!(next.trend, Trend::Up);
        assert_eq!((next.consecutive_up, next.consecutive_down), (1, 0));
        assert!(c.step(&next, &Quote::new(105.0)).is_none());
    }

    #[test]
    fn reversal_steps_two_bricks_and_resets_streak() {
        let c = StandardClassifier::new(10.0);
        let seed = c.seed(&Quote::new(95.0));
        let up = c.step(&seed, &Quote::new(105.0)).unwrap();
        let down = c.step(&up, &Quote::new(85.0)).unwrap();
        assert!((down.renko_price - 85.0).abs() < f64::EPSILON);
        assert!((down.lower_bound - 75.0).abs() < f64::EPSILON);
        assert!((down.upper_bound - 105.0).abs() < f64::EPSILON);
        assert_eq!(down.trend, Trend::Down);
        assert_eq!((down.consecutive_up, down.consecutive_down), (0, 1));
    }

    #[test]
    fn price_on_a_bound_breaches() {
        let c = StandardClassifier::new(10.0);
        let seed = c.seed(&Quote::new(50.0));
        assert!(c.step(&seed, &Quote::new(60.0)).is_some());
        assert!(c.step(&seed, &Quote::new(40.0)).is_some());
        assert!(c.step(&seed, &Quote::new(59.999)).is_none());
    }
}
