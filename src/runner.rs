//! Scenario runner for batch projections and side-by-side comparison
//!
//! Holds one configured engine and runs it over many scenarios in parallel.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ProjectionError;
use crate::projection::{ProjectedFigures, ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::scenario::{Scenario, ScenarioType};

/// Scenarios compared when the caller does not pick any
pub const DEFAULT_COMPARE_COUNT: usize = 3;

/// Projection of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioProjection {
    pub scenario_id: u32,
    pub result: Result<ProjectionResult, ProjectionError>,
}

/// One column of a scenario comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub scenario_id: u32,
    pub name: String,
    pub scenario_type: ScenarioType,
    pub initial_investment: Decimal,
    pub monthly_contribution: Decimal,
    pub annual_return_rate_pct: Decimal,
    pub investment_period_years: u32,
    pub projected_value: Decimal,
    pub total_contributions: Decimal,
    pub total_gains: Decimal,
    /// Gains over contributions in percent, rounded to cents
    pub roi_pct: Option<Decimal>,
}

/// Pre-configured runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for projection in runner.run_batch(&scenarios) {
///     println!("{}: {:?}", projection.scenario_id, projection.result);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default configuration (snapshots included)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> Result<ProjectionResult, ProjectionError> {
        self.engine.project(&scenario.parameters)
    }

    /// Run many scenarios in parallel, results in input order
    ///
    /// A scenario the engine rejects does not stop the batch; its error is
    /// reported in its own slot.
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioProjection> {
        let projections: Vec<ScenarioProjection> = scenarios
            .par_iter()
            .map(|scenario| ScenarioProjection {
                scenario_id: scenario.id,
                result: self.run(scenario),
            })
            .collect();

        let failed = projections.iter().filter(|p| p.result.is_err()).count();
        for projection in &projections {
            if let Err(err) = &projection.result {
                log::warn!("Scenario {} rejected: {}", projection.scenario_id, err);
            }
        }
        log::info!("Projected {} scenarios ({} rejected)", projections.len(), failed);

        projections
    }

    /// Compare the selected scenarios side by side
    ///
    /// With no ids, the most recently created scenarios are compared. Ids that
    /// match nothing are ignored; scenarios the engine rejects are skipped.
    pub fn compare(&self, scenarios: &[Scenario], ids: &[u32]) -> Vec<ComparisonRow> {
        let selected: Vec<&Scenario> = if ids.is_empty() {
            let mut newest: Vec<&Scenario> = scenarios.iter().collect();
            newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            newest.truncate(DEFAULT_COMPARE_COUNT);
            newest
        } else {
            scenarios.iter().filter(|s| ids.contains(&s.id)).collect()
        };

        selected
            .into_iter()
            .filter_map(|scenario| match self.run(scenario) {
                Ok(result) => Some(comparison_row(scenario, &result)),
                Err(err) => {
                    log::warn!("Skipping scenario {} in comparison: {}", scenario.id, err);
                    None
                }
            })
            .collect()
    }
}

fn comparison_row(scenario: &Scenario, result: &ProjectionResult) -> ComparisonRow {
    let params = &scenario.parameters;
    ComparisonRow {
        scenario_id: scenario.id,
        name: scenario.name.clone(),
        scenario_type: scenario.scenario_type,
        initial_investment: params.initial_investment,
        monthly_contribution: params.monthly_contribution,
        annual_return_rate_pct: params.annual_return_rate_pct,
        investment_period_years: params.investment_period_years,
        projected_value: result.projected_value,
        total_contributions: result.total_contributions,
        total_gains: result.total_gains,
        roi_pct: result.roi_pct().map(|roi| roi.round_dp(2)),
    }
}
