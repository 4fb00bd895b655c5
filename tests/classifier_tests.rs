use renko_bricks::classifier::{BrickClassifier, Classification};
use renko_bricks::{GridPriceMode, Quote, RenkoConfig, RenkoEngine, Trend, Variant};

fn run(variant: Variant, mode: GridPriceMode, size: f64, prices: &[f64]) -> RenkoEngine {
    let config = RenkoConfig::new(size)
        .with_variant(variant)
        .with_grid_price_mode(mode);
    let mut engine = RenkoEngine::new(&config).unwrap();
    engine.ingest(prices, None, None).unwrap();
    engine
}

fn renko(engine: &RenkoEngine) -> Vec<f64> {
    engine.bricks().iter().map(|b| b.renko_price).collect()
}

fn trends(engine: &RenkoEngine) -> Vec<i8> {
    engine.bricks().iter().map(|b| b.trend.as_i8()).collect()
}

fn counts(engine: &RenkoEngine) -> Vec<u64> {
    engine.bricks().iter().map(|b| b.count).collect()
}

/// Deterministic pseudo-random walk so the property checks cover many shapes.
fn walk(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut price = 1_000.0;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let step = ((state >> 33) % 61) as f64 - 30.0;
            price += step * 0.75;
            price
        })
        .collect()
}

#[test]
fn symmetric_reversal_takes_one_step() {
    let engine = run(
        Variant::Symmetric,
        GridPriceMode::Avg,
        10.0,
        &[100.0, 125.0, 95.0],
    );
    assert_eq!(renko(&engine), vec![100.0, 110.0, 120.0, 110.0, 100.0]);
    assert_eq!(trends(&engine), vec![0, 1, 1, -1, -1]);
    assert_eq!(counts(&engine), vec![1, 0, 1, 0, 1]);
    for brick in engine.bricks() {
        assert!((brick.width() - 20.0).abs() < 1e-9);
        assert_eq!((brick.consecutive_up, brick.consecutive_down), (0, 0));
    }
}

#[test]
fn standard_reversal_takes_two_steps() {
    let engine = run(
        Variant::Standard,
        GridPriceMode::Avg,
        10.0,
        &[100.0, 125.0, 95.0],
    );
    // 100 -> 110 -> 120 up, then a reversal needs 120 - 20 = 100
    assert_eq!(renko(&engine), vec![100.0, 110.0, 120.0, 100.0]);
    assert_eq!(trends(&engine), vec![0, 1, 1, -1]);
    assert_eq!(engine.bricks()[2].consecutive_up, 2);
    assert_eq!(engine.bricks()[3].consecutive_down, 1);
}

#[test]
fn grid_bridges_cells_in_both_directions() {
    let engine = run(
        Variant::Grid,
        GridPriceMode::Avg,
        10.0,
        &[22.0, 27.0, 31.0, 58.0, 12.0],
    );
    assert_eq!(
        renko(&engine),
        vec![25.0, 35.0, 45.0, 55.0, 45.0, 35.0, 25.0, 15.0]
    );
    assert_eq!(trends(&engine), vec![0, 1, 1, 1, -1, -1, -1, -1]);
    assert_eq!(counts(&engine), vec![2, 1, 0, 1, 0, 0, 0, 1]);
}

#[test]
fn grid_cell_is_half_open() {
    let engine = run(
        Variant::Grid,
        GridPriceMode::Min,
        10.0,
        &[22.0, 20.0, 30.0],
    );
    assert_eq!(renko(&engine), vec![20.0, 30.0]);
    assert_eq!(counts(&engine), vec![2, 1]);
}

#[test]
fn grid_price_ignores_history_within_cell() {
    for mode in [GridPriceMode::Avg, GridPriceMode::Min, GridPriceMode::Max] {
        let a = run(Variant::Grid, mode, 10.0, &[22.0, 37.0]);
        let b = run(Variant::Grid, mode, 10.0, &[28.0, 21.0, 39.0]);
        let last_a = a.last_brick().unwrap();
        let last_b = b.last_brick().unwrap();
        assert_eq!(last_a.renko_price, last_b.renko_price);
        assert_eq!(last_a.trend, last_b.trend);
        assert_eq!(last_a.trend, Trend::Up);
    }
}

#[test]
fn grid_price_modes() {
    let avg = run(Variant::Grid, GridPriceMode::Avg, 5.0, &[12.0]);
    let min = run(Variant::Grid, GridPriceMode::Min, 5.0, &[12.0]);
    let max = run(Variant::Grid, GridPriceMode::Max, 5.0, &[12.0]);
    assert_eq!(renko(&avg), vec![12.5]);
    assert_eq!(renko(&min), vec![10.0]);
    assert_eq!(renko(&max), vec![15.0]);
}

#[test]
fn grid_stays_flat_inside_seed_cell() {
    let engine = run(
        Variant::Grid,
        GridPriceMode::Avg,
        10.0,
        &[41.0, 49.0, 40.0, 45.5],
    );
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.bricks()[0].trend, Trend::Flat);
}

#[test]
fn classify_returns_bricks_in_order() {
    let c = BrickClassifier::new(Variant::Standard, 1.0, GridPriceMode::Avg);
    let seed = c.seed(&Quote::new(10.0));
    match c.classify(&seed, &Quote::new(14.2).with_volume(3.0)) {
        Classification::NewBricks(bricks) => {
            let prices: Vec<f64> = bricks.iter().map(|b| b.renko_price).collect();
            assert_eq!(prices, vec![11.0, 12.0, 13.0, 14.0]);
            assert_eq!(bricks[0].volume, Some(0.0));
            assert_eq!(bricks[3].volume, Some(3.0));
            assert_eq!(bricks[3].count, 1);
        }
        Classification::Extend => panic!("expected new bricks"),
    }
}

#[test]
fn invariants_hold_on_random_walks() {
    for seed in 1..=5_u64 {
        let prices = walk(500, seed);
        for variant in [Variant::Standard, Variant::Symmetric, Variant::Grid] {
            let engine = run(variant, GridPriceMode::Avg, 7.5, &prices);
            let bricks = engine.bricks();

            assert_eq!(bricks[0].trend, Trend::Flat);
            assert_eq!(engine.score().count, prices.len() as u64);

            for (i, brick) in bricks.iter().enumerate() {
                assert!(brick.lower_bound < brick.upper_bound);
                if i > 0 {
                    assert_ne!(brick.trend, Trend::Flat);
                }
                match variant {
                    Variant::Standard if i > 0 => {
                        let w = brick.width();
                        assert!((w - 15.0).abs() < 1e-6 || (w - 22.5).abs() < 1e-6);
                    }
                    Variant::Standard | Variant::Symmetric => {
                        assert!((brick.width() - 15.0).abs() < 1e-6);
                    }
                    Variant::Grid => {
                        assert!((brick.width() - 7.5).abs() < 1e-6);
                        let k = (brick.lower_bound / 7.5).round();
                        assert!((k * 7.5 - brick.lower_bound).abs() < 1e-6);
                    }
                }
            }

            // the open brick always holds the most recent quote
            let last = engine.last_brick().unwrap();
            assert_eq!(last.last_price, *prices.last().unwrap());
        }
    }
}
