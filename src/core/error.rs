//! Error types for the application

use crate::core::Field;
use rust_decimal::Decimal;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error loading file: {0}")]
    Import(#[from] ImportError),

    #[error("No device at position {0}")]
    DeviceNotFound(usize),
}

/// Rejected user input. The mutation that produced it is not applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a device name.")]
    EmptyName,

    #[error("Device '{name}': load allocations must sum to 100%. Current sum: {sum}%")]
    AllocationSum { name: String, sum: Decimal },

    #[error("Device '{name}': total hours cannot exceed 24. Current total: {total:.2}")]
    HoursOverflow { name: String, total: Decimal },

    #[error("Device '{name}': {field} must be {expected} (got {value})")]
    OutOfRange {
        name: String,
        field: Field,
        value: Decimal,
        expected: &'static str,
    },

    #[error("Device '{name}': {field} is not a number ({value:?})")]
    InvalidNumber {
        name: String,
        field: Field,
        value: String,
    },

    #[error("Invalid time {0:?}: expected decimal hours or HH:MM")]
    InvalidClock(String),

    #[error("{which} rate cannot be negative (got {value})")]
    NegativeRate { which: &'static str, value: Decimal },
}

/// Failure to compute a single row. Recovered as an all-zero result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowComputationError {
    #[error("{field} is not a number ({value:?})")]
    Malformed { field: Field, value: String },

    #[error("arithmetic overflow while computing cost")]
    Overflow,
}

/// Whole-file import failure. Nothing from the file is applied.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid value {value:?} in column '{column}'")]
    InvalidRate { column: &'static str, value: String },

    #[error("device {row}: {source}")]
    InvalidRow { row: usize, source: ValidationError },
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
