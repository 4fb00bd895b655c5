use super::quote::Quote;

/// Number of numeric columns in a raw brick row.
pub const COLUMNS: usize = 11;

/// Column labels of the raw row layout, in order.
pub const COLUMN_NAMES: [&str; COLUMNS] = [
    "last_price",
    "renko_price",
    "lower_bound",
    "upper_bound",
    "start_time",
    "end_time",
    "trend",
    "volume",
    "count",
    "consecutive_up",
    "consecutive_down",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Down,
    Flat,
    Up,
}

impl Trend {
    pub fn as_i8(self) -> i8 {
        match self {
            Trend::Down => -1,
            Trend::Flat => 0,
            Trend::Up => 1,
        }
    }
}

/// One row of the brick table. Only the last row of a store is ever open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub last_price: f64,
    pub renko_price: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub trend: Trend,
    pub volume: Option<f64>,
    pub count: u64,
    pub consecutive_up: u32,
    pub consecutive_down: u32,
}

impl Brick {
    /// First brick of a series, built from the first quote.
    pub fn seed(quote: &Quote, renko_price: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            last_price: quote.price,
            renko_price,
            lower_bound,
            upper_bound,
            start_time: quote.time,
            end_time: quote.time,
            trend: Trend::Flat,
            volume: quote.volume,
            count: 1,
            consecutive_up: 0,
            consecutive_down: 0,
        }
    }

    /// A brick produced while bridging a price jump. It has absorbed no quote
    /// yet; call [`Brick::land`] on the one where the price finally settles.
    pub fn bridging(
        quote: &Quote,
        renko_price: f64,
        lower_bound: f64,
        upper_bound: f64,
        trend: Trend,
    ) -> Self {
        Self {
            last_price: quote.price,
            renko_price,
            lower_bound,
            upper_bound,
            start_time: quote.time,
            end_time: quote.time,
            trend,
            volume: quote.volume.map(|_| 0.0),
            count: 0,
            consecutive_up: 0,
            consecutive_down: 0,
        }
    }

    pub fn with_streak(mut self, consecutive_up: u32, consecutive_down: u32) -> Self {
        self.consecutive_up = consecutive_up;
        self.consecutive_down = consecutive_down;
        self
    }

    pub fn land(&mut self, quote: &Quote) {
        self.count = 1;
        self.volume = quote.volume;
    }

    /// Absorb a quote that stays within this brick.
    pub fn absorb(&mut self, quote: &Quote) {
        self.last_price = quote.price;
        self.count += 1;
        if let Some(time) = quote.time {
            self.end_time = Some(time);
        }
        if let Some(volume) = quote.volume {
            self.volume = Some(self.volume.unwrap_or(0.0) + volume);
        }
    }

    /// True when `price` lies strictly between the bounds.
    pub fn contains(&self, price: f64) -> bool {
        price > self.lower_bound && price < self.upper_bound
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Raw numeric row; absent optional values become `NaN`.
    pub fn to_row(&self) -> [f64; COLUMNS] {
        [
            self.last_price,
            self.renko_price,
            self.lower_bound,
            self.upper_bound,
            self.start_time.unwrap_or(f64::NAN),
            self.end_time.unwrap_or(f64::NAN),
            f64::from(self.trend.as_i8()),
            self.volume.unwrap_or(f64::NAN),
            self.count as f64,
            f64::from(self.consecutive_up),
            f64::from(self.consecutive_down),
        ]
    }
}
