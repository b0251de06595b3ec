//! AWS Lambda handler for scenario projections
//!
//! Accepts scenarios (and optionally alert conditions) as JSON, returns the
//! projected figures with yearly snapshots and each alert's evaluation.
//! Decimal amounts travel as JSON strings.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use scenario_forecaster::{
    evaluate, runner::ScenarioRunner, AlertCondition, ProjectionConfig, ProjectionResult, Scenario,
    ScenarioParameters, ScenarioType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub scenarios: Vec<ScenarioInput>,

    /// Alert conditions to evaluate against the projected scenarios
    #[serde(default)]
    pub alerts: Vec<AlertInput>,

    /// Include yearly snapshots in the response (default: true)
    #[serde(default = "default_include_snapshots")]
    pub include_snapshots: bool,
}

fn default_include_snapshots() -> bool { true }

#[derive(Debug, Deserialize)]
pub struct ScenarioInput {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scenario_type: ScenarioType,
    #[serde(flatten)]
    pub parameters: ScenarioParameters,
}

#[derive(Debug, Deserialize)]
pub struct AlertInput {
    pub id: u32,
    pub scenario_id: u32,
    #[serde(flatten)]
    pub condition: AlertCondition,
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub scenarios: Vec<ScenarioOutput>,
    pub alerts: Vec<AlertOutput>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ScenarioOutput {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlertOutput {
    pub id: u32,
    pub scenario_id: u32,
    /// False when the scenario is unknown or could not be projected
    pub condition_met: bool,
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ForecastRequest>) -> Result<ForecastResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let scenarios: Vec<Scenario> = request
        .scenarios
        .into_iter()
        .map(|input| {
            let mut scenario = Scenario::new(input.id, input.name, input.parameters);
            scenario.scenario_type = input.scenario_type;
            scenario
        })
        .collect();

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        include_snapshots: request.include_snapshots,
    });
    let projections = runner.run_batch(&scenarios);

    let projected: HashMap<u32, &ProjectionResult> = projections
        .iter()
        .filter_map(|p| p.result.as_ref().ok().map(|result| (p.scenario_id, result)))
        .collect();

    let alerts = request
        .alerts
        .iter()
        .map(|alert| AlertOutput {
            id: alert.id,
            scenario_id: alert.scenario_id,
            condition_met: projected
                .get(&alert.scenario_id)
                .is_some_and(|figures| evaluate(&alert.condition, *figures)),
        })
        .collect();

    let scenarios = projections
        .into_iter()
        .map(|p| match p.result {
            Ok(result) => ScenarioOutput {
                id: p.scenario_id,
                projection: Some(result),
                error: None,
            },
            Err(err) => ScenarioOutput {
                id: p.scenario_id,
                projection: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    Ok(ForecastResponse {
        scenarios,
        alerts,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
