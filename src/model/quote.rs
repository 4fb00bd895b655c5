use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A single price observation after date normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub time: Option<f64>,
    pub volume: Option<f64>,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            time: None,
            volume: None,
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Caller-supplied date of a quote, before it is reduced to a numeric
/// timestamp (seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteTime {
    Numeric(f64),
    Utc(DateTime<Utc>),
    /// Interpreted as UTC.
    Naive(NaiveDateTime),
    /// Midnight UTC of the given day.
    Date(NaiveDate),
    /// RFC 3339, `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d` or a plain number.
    Text(String),
}

impl QuoteTime {
    /// Returns `None` for representations that cannot be reduced to a finite
    /// timestamp.
    pub fn to_timestamp(&self) -> Option<f64> {
        match self {
            QuoteTime::Numeric(v) => v.is_finite().then_some(*v),
            QuoteTime::Utc(dt) => Some(seconds(dt)),
            QuoteTime::Naive(ndt) => Some(seconds(&ndt.and_utc())),
            QuoteTime::Date(d) => d.and_hms_opt(0, 0, 0).map(|ndt| seconds(&ndt.and_utc())),
            QuoteTime::Text(s) => parse_text(s.trim()),
        }
    }
}

fn seconds(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_micros() as f64 / 1_000_000.0
}

fn parse_text(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(seconds(&dt.with_timezone(&Utc)));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(seconds(&ndt.and_utc()));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| seconds(&ndt.and_utc()));
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl From<f64> for QuoteTime {
    fn from(value: f64) -> Self {
        QuoteTime::Numeric(value)
    }
}

impl From<i64> for QuoteTime {
    fn from(value: i64) -> Self {
        QuoteTime::Numeric(value as f64)
    }
}

impl From<DateTime<Utc>> for QuoteTime {
    fn from(value: DateTime<Utc>) -> Self {
        QuoteTime::Utc(value)
    }
}

impl From<NaiveDateTime> for QuoteTime {
    fn from(value: NaiveDateTime) -> Self {
        QuoteTime::Naive(value)
    }
}

impl From<NaiveDate> for QuoteTime {
    fn from(value: NaiveDate) -> Self {
        QuoteTime::Date(value)
    }
}

impl From<&str> for QuoteTime {
    fn from(value: &str) -> Self {
        QuoteTime::Text(value.to_string())
    }
}

impl From<String> for QuoteTime {
    fn from(value: String) -> Self {
        QuoteTime::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_passes_through() {
        assert_eq!(QuoteTime::from(17_i64).to_timestamp(), Some(17.0));
        assert_eq!(QuoteTime::from(1.5).to_timestamp(), Some(1.5));
        assert_eq!(QuoteTime::Numeric(f64::NAN).to_timestamp(), None);
    }

    #[test]
    fn dates_reduce_to_midnight_utc() {
        let d = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        assert_eq!(QuoteTime::from(d).to_timestamp(), Some(1_420_070_400.0));
        assert_eq!(
            QuoteTime::from("2015-01-01").to_timestamp(),
            Some(1_420_070_400.0)
        );
    }

    #[test]
    fn text_forms() {
        assert_eq!(
            QuoteTime::from("2015-01-01T00:00:10Z").to_timestamp(),
            Some(1_420_070_410.0)
        );
        assert_eq!(
            QuoteTime::from("2015-01-01T01:00:00+01:00").to_timestamp(),
            Some(1_420_070_400.0)
        );
        assert_eq!(
            QuoteTime::from("2015-01-01 00:01:00").to_timestamp(),
            Some(1_420_070_460.0)
        );
        assert_eq!(QuoteTime::from(" 42 ").to_timestamp(), Some(42.0));
        assert_eq!(QuoteTime::from("yesterday").to_timestamp(), None);
        assert_eq!(QuoteTime::from("").to_timestamp(), None);
    }
}
