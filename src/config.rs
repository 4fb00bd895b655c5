use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::classifier::{GridPriceMode, Variant};
use crate::error::RenkoError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_INITIAL_CAPACITY: usize = 10_000;
pub const DEFAULT_GROWTH_PCT: f64 = 0.5;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub renko: RenkoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Construction parameters of a [`crate::engine::RenkoEngine`]; fixed for the
/// engine's lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenkoConfig {
    pub brick_size: f64,
    #[serde(default)]
    pub variant: Variant,
    /// Only consulted by the grid variant.
    #[serde(default)]
    pub grid_price_mode: GridPriceMode,
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Fractional store growth per resize; `<= 0` adds a fixed 100 rows.
    #[serde(default = "default_growth_pct")]
    pub growth_pct: f64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn default_growth_pct() -> f64 {
    DEFAULT_GROWTH_PCT
}

fn default_level() -> String {
    "info".to_string()
}

impl RenkoConfig {
    pub fn new(brick_size: f64) -> Self {
        Self {
            brick_size,
            variant: Variant::default(),
            grid_price_mode: GridPriceMode::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_pct: DEFAULT_GROWTH_PCT,
            name: None,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_grid_price_mode(mut self, mode: GridPriceMode) -> Self {
        self.grid_price_mode = mode;
        self
    }

    pub fn with_capacity(mut self, initial_capacity: usize, growth_pct: f64) -> Self {
        self.initial_capacity = initial_capacity;
        self.growth_pct = growth_pct;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.brick_size.is_finite() && self.brick_size > 0.0) {
            return Err(RenkoError::InvalidBrickSize(self.brick_size));
        }
        if self.initial_capacity == 0 {
            return Err(RenkoError::InvalidCapacity(self.initial_capacity));
        }
        Ok(())
    }
}

impl Config {
    /// Load from a TOML file, then apply `RENKO_BRICK_SIZE` / `RENKO_VARIANT`
    /// from `.env` or the environment.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        config.apply_overrides(
            std::env::var("RENKO_BRICK_SIZE").ok().as_deref(),
            std::env::var("RENKO_VARIANT").ok().as_deref(),
        )?;
        config
            .renko
            .validate()
            .context("renko section is invalid")?;

        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid renko config")
    }

    pub fn apply_overrides(
        &mut self,
        brick_size: Option<&str>,
        variant: Option<&str>,
    ) -> Result<()> {
        if let Some(raw) = brick_size {
            self.renko.brick_size = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("RENKO_BRICK_SIZE '{}' is not a number", raw))?;
        }
        if let Some(raw) = variant {
            self.renko.variant = raw
                .parse::<Variant>()
                .context("RENKO_VARIANT is invalid")?;
        }
        Ok(())
    }
}
