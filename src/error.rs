use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenkoError {
    #[error("invalid brick size {0}: must be a finite value > 0")]
    InvalidBrickSize(f64),

    #[error("invalid initial capacity {0}: must be > 0")]
    InvalidCapacity(usize),

    #[error("{field} has {actual} entries but prices has {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported timestamp at index {index}: {value}")]
    UnsupportedTimestamp { index: usize, value: String },

    #[error("non-finite price at index {index}: {price}")]
    NonFinitePrice { index: usize, price: f64 },

    #[error("price {price} at index {index} is too large to resolve brick size {brick_size}")]
    UnresolvablePrice {
        index: usize,
        price: f64,
        brick_size: f64,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RenkoError>;
