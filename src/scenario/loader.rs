//! Load scenarios from scenarios.csv

use super::{Scenario, ScenarioParameters, ScenarioType, DEFAULT_INFLATION_RATE_PCT};
use crate::error::LoadError;
use chrono::{DateTime, Utc};
use csv::Reader;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

/// Default path to the scenario file
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// Raw CSV row matching scenarios.csv columns
///
/// Money and rate columns stay textual until `to_scenario` so they are parsed
/// exactly instead of passing through a float.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: u32,
    name: String,
    scenario_type: Option<String>,
    initial_investment: String,
    monthly_contribution: Option<String>,
    annual_return_rate: String,
    investment_period_years: u32,
    inflation_rate: Option<String>,
    volatility: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl CsvRow {
    fn to_scenario(self) -> Result<Scenario, LoadError> {
        let id = self.id;

        let scenario_type = match self.scenario_type.as_deref() {
            None => ScenarioType::default(),
            Some(key) => ScenarioType::from_key(key).ok_or_else(|| LoadError::InvalidField {
                id,
                field: "scenario_type",
                value: key.to_string(),
            })?,
        };

        let parameters = ScenarioParameters {
            initial_investment: parse_decimal(id, "initial_investment", &self.initial_investment)?,
            monthly_contribution: parse_optional_decimal(id, "monthly_contribution", self.monthly_contribution.as_deref())?
                .unwrap_or(Decimal::ZERO),
            annual_return_rate_pct: parse_decimal(id, "annual_return_rate", &self.annual_return_rate)?,
            investment_period_years: self.investment_period_years,
            inflation_rate_pct: parse_optional_decimal(id, "inflation_rate", self.inflation_rate.as_deref())?
                .unwrap_or(DEFAULT_INFLATION_RATE_PCT),
            volatility_pct: parse_optional_decimal(id, "volatility", self.volatility.as_deref())?
                .unwrap_or(Decimal::ZERO),
        };

        Ok(Scenario {
            id,
            name: self.name,
            scenario_type,
            parameters,
            created_at: self.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        })
    }
}

/// Parse a decimal cell, reporting the row and column on failure
pub(crate) fn parse_decimal(id: u32, field: &'static str, raw: &str) -> Result<Decimal, LoadError> {
    Decimal::from_str(raw.trim()).map_err(|_| LoadError::InvalidField {
        id,
        field,
        value: raw.to_string(),
    })
}

/// Parse an optional decimal cell; blank means absent
pub(crate) fn parse_optional_decimal(
    id: u32,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, LoadError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_decimal(id, field, value).map(Some),
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    log::debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Load scenarios from the default data/scenarios.csv location
pub fn load_default_scenarios() -> Result<Vec<Scenario>, LoadError> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}
