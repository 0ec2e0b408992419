//! Error taxonomy for projection runs
//!
//! All inputs are validated before the year loop starts: a run either
//! produces a full table or fails fast with one of these variants.

use thiserror::Error;

/// Errors that can reject a projection run at entry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Retirement age must be strictly greater than current age
    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    InvalidAgeRange { current_age: u8, retirement_age: u8 },

    /// Filing status has no matching bracket schedule
    #[error("no tax bracket schedule for filing status `{0}`")]
    UnknownFilingStatus(String),

    /// A balance, rate, or contribution amount was supplied as negative
    #[error("{field} must be non-negative, got {value}")]
    NegativeInput { field: &'static str, value: f64 },

    /// A loaded bracket schedule was empty, unordered, or not zero-based
    #[error("invalid bracket schedule: {0}")]
    InvalidBracketSchedule(String),
}
