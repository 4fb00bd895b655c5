use std::io::BufRead;

use anyhow::{bail, Context, Result};

use crate::model::quote::QuoteTime;

/// One parsed `price[,volume[,timestamp]]` line.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub price: f64,
    pub volume: Option<f64>,
    pub time: Option<QuoteTime>,
}

/// Column-oriented quotes, ready for [`crate::engine::RenkoEngine::ingest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteColumns {
    pub prices: Vec<f64>,
    pub volumes: Vec<Option<f64>>,
    pub dates: Vec<Option<QuoteTime>>,
}

impl QuoteColumns {
    pub fn push(&mut self, line: QuoteLine) {
        self.prices.push(line.price);
        self.volumes.push(line.volume);
        self.dates.push(line.time);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Volumes, or `None` when no line carried one.
    pub fn volumes(&self) -> Option<&[Option<f64>]> {
        self.volumes
            .iter()
            .any(Option::is_some)
            .then_some(self.volumes.as_slice())
    }

    /// Dates, or `None` when no line carried one.
    pub fn dates(&self) -> Option<&[Option<QuoteTime>]> {
        self.dates
            .iter()
            .any(Option::is_some)
            .then_some(self.dates.as_slice())
    }
}

/// Parse a single input line. Blank lines, `#` comments and a `price` header
/// yield `None`.
pub fn parse_quote_line(line: &str) -> Result<Option<QuoteLine>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() > 3 {
        bail!(
            "expected at most 3 fields (price,volume,timestamp), got {}",
            fields.len()
        );
    }
    if fields[0].eq_ignore_ascii_case("price") {
        return Ok(None);
    }

    let price: f64 = fields[0]
        .parse()
        .with_context(|| format!("invalid price '{}'", fields[0]))?;

    let volume = match fields.get(1) {
        Some(v) if !v.is_empty() => Some(
            v.parse::<f64>()
                .with_context(|| format!("invalid volume '{}'", v))?,
        ),
        _ => None,
    };

    let time = match fields.get(2) {
        Some(t) if !t.is_empty() => Some(QuoteTime::from(*t)),
        _ => None,
    };

    Ok(Some(QuoteLine {
        price,
        volume,
        time,
    }))
}

pub fn read_quotes<R: BufRead>(reader: R) -> Result<QuoteColumns> {
    let mut columns = QuoteColumns::default();
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", n + 1))?;
        if let Some(quote) =
            parse_quote_line(&line).with_context(|| format!("line {}", n + 1))?
        {
            columns.push(quote);
        }
    }
    Ok(columns)
}
