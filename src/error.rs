use thiserror::Error;

/// Reasons an `add_item` call can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("unit price must not be negative")]
    NegativePrice,
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    #[error("quantity overflow")]
    QuantityOverflow,
    #[error("line total overflow")]
    AmountOverflow,
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("position {position} is out of range for a cart with {len} items")]
    InvalidPosition { position: i64, len: usize },
    #[error("cannot add item: {0}")]
    Fault(#[from] Fault),
    #[error("product at index {0} is already in the cart")]
    DuplicateProduct(usize),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, CartError>;
