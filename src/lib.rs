//! Scenario Forecaster - compound-growth projections for personal investment scenarios
//!
//! This library provides:
//! - Closed-form projection of a scenario (lump sum plus monthly contributions)
//! - Yearly cumulative snapshots over the scenario horizon
//! - Threshold, ROI, milestone, goal and reminder alerts over projected figures
//! - An on-demand alert check pass producing notifications
//! - Parallel batch runs and side-by-side scenario comparison
//!
//! Persistence, authentication, and email delivery belong to the calling
//! application: projections are returned as values, never saved.

pub mod error;
pub mod scenario;
pub mod projection;
pub mod alerts;
pub mod runner;

// Re-export commonly used types
pub use error::{DomainError, LoadError, ProjectionError};
pub use scenario::{Scenario, ScenarioParameters, ScenarioType};
pub use projection::{
    generate_snapshots, project, ProjectedFigures, ProjectionConfig, ProjectionEngine,
    ProjectionResult, ScenarioFigures, YearlySnapshot,
};
pub use alerts::{evaluate, Alert, AlertCondition, AlertStatus, AlertType, Notification};
pub use runner::ScenarioRunner;
