//! Error types for projections and data loading

use rust_decimal::Decimal;
use thiserror::Error;

/// Scenario parameters the projection formula cannot be evaluated on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("investment period must be at least 1 year, got {years}")]
    InvalidPeriod { years: u32 },

    /// Monthly growth factor `1 + rate/100/12` is zero or negative
    #[error("annual return rate {annual_rate_pct}% gives a non-positive monthly growth factor")]
    NonPositiveGrowthFactor { annual_rate_pct: Decimal },
}

/// Failure while computing a projection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("projection over {months} months exceeds the representable decimal range")]
    Overflow { months: u32 },
}

/// Failure while loading scenarios or alerts from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {id}: invalid {field} value '{value}'")]
    InvalidField {
        id: u32,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
