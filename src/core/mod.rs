//! Core module - Data model, configuration, and common types

pub mod clock;
mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, RateConfig, StorageConfig};
pub use error::{Error, ImportError, Result, RowComputationError, ValidationError};
pub use types::{CostResult, DeviceRecord, Field, Numeric, RateSettings, RowCost, Totals};
