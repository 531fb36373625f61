//! Error types for rate lookup, estimation, and table loading

use crate::rates::{ServiceType, Tier};
use thiserror::Error;

/// Failures surfaced by the estimation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// The (service, tier) pair has no entry in the rate table
    #[error("No rate plan defined for service '{service}' at tier '{tier}'")]
    UnknownRatePlan { service: ServiceType, tier: Tier },

    /// An enum label outside its set, or a count/rate outside its range
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl QuoteError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        QuoteError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures while loading rate tables, currency tables, or request files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: QuoteError,
    },

    #[error("Row {row}: invalid entry: {reason}")]
    InvalidEntry { row: usize, reason: String },

    #[error("Duplicate rate plan for service '{service}' at tier '{tier}'")]
    Duplicate { service: ServiceType, tier: Tier },
}

pub type QuoteResult<T> = std::result::Result<T, QuoteError>;
