//! Projection engine for compound-growth scenario projections

mod engine;
mod results;
pub mod rounding;

pub use engine::{generate_snapshots, project, ProjectionConfig, ProjectionEngine};
pub use results::{ProjectedFigures, ProjectionResult, ScenarioFigures, YearlySnapshot};
pub use rounding::round_money;
