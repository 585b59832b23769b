//! The module contains the errors the engine can throw.
//!
//! - [`KeyNotFound`] thrown when no expense has the requested id.
//! - [`IdsExhausted`] thrown when the id counter cannot advance any further.
//! - [`TotalOutOfRange`] thrown when summed amounts overflow an `f64`.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`IdsExhausted`]: EngineError::IdsExhausted
//!  [`TotalOutOfRange`]: EngineError::TotalOutOfRange
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("expense {0} not found")]
    KeyNotFound(i64),
    #[error("no expense ids left, last assigned was {0}")]
    IdsExhausted(i64),
    #[error("expense totals are out of range")]
    TotalOutOfRange,
}
