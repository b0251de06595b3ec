//! Scenario data structures and CSV loading

mod data;
pub mod loader;

pub use data::{Scenario, ScenarioParameters, ScenarioType, DEFAULT_INFLATION_RATE_PCT};
pub use loader::{load_scenarios, load_scenarios_from_reader, load_default_scenarios};
