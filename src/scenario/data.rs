//! Scenario data structures matching the scenario CSV format

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default annual inflation assumption in percent
pub const DEFAULT_INFLATION_RATE_PCT: Decimal = Decimal::from_parts(25, 0, 0, false, 1);

/// Outlook a scenario was built around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioType {
    Optimistic,
    #[default]
    Realistic,
    Pessimistic,
    Custom,
}

impl ScenarioType {
    /// Parse the lowercase key used in CSV files
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "optimistic" => Some(ScenarioType::Optimistic),
            "realistic" => Some(ScenarioType::Realistic),
            "pessimistic" => Some(ScenarioType::Pessimistic),
            "custom" => Some(ScenarioType::Custom),
            _ => None,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioType::Optimistic => "Optimistic",
            ScenarioType::Realistic => "Realistic",
            ScenarioType::Pessimistic => "Pessimistic",
            ScenarioType::Custom => "Custom",
        }
    }
}

/// Inputs to one projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Lump sum invested at month 0
    pub initial_investment: Decimal,

    /// Deposit made at the end of every month
    #[serde(default)]
    pub monthly_contribution: Decimal,

    /// Nominal annual return in percent (7 means 7%)
    pub annual_return_rate_pct: Decimal,

    /// Horizon in whole years
    pub investment_period_years: u32,

    /// Carried for display only, never enters the projection
    #[serde(default = "default_inflation_rate_pct")]
    pub inflation_rate_pct: Decimal,

    /// Carried for display only, never enters the projection
    #[serde(default)]
    pub volatility_pct: Decimal,
}

fn default_inflation_rate_pct() -> Decimal {
    DEFAULT_INFLATION_RATE_PCT
}

impl ScenarioParameters {
    /// Parameters with no monthly contribution and default display assumptions
    pub fn new(
        initial_investment: Decimal,
        annual_return_rate_pct: Decimal,
        investment_period_years: u32,
    ) -> Self {
        Self {
            initial_investment,
            monthly_contribution: Decimal::ZERO,
            annual_return_rate_pct,
            investment_period_years,
            inflation_rate_pct: DEFAULT_INFLATION_RATE_PCT,
            volatility_pct: Decimal::ZERO,
        }
    }

    pub fn with_monthly_contribution(mut self, monthly_contribution: Decimal) -> Self {
        self.monthly_contribution = monthly_contribution;
        self
    }
}

/// A named scenario owned by a user of the surrounding application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique scenario identifier
    pub id: u32,

    pub name: String,

    pub scenario_type: ScenarioType,

    pub parameters: ScenarioParameters,

    /// Creation time, newest scenarios are compared by default
    pub created_at: DateTime<Utc>,
}

impl Scenario {
    pub fn new(id: u32, name: impl Into<String>, parameters: ScenarioParameters) -> Self {
        Self {
            id,
            name: name.into(),
            scenario_type: ScenarioType::default(),
            parameters,
            created_at: Utc::now(),
        }
    }

    /// Display name, e.g. "Retirement Plan (realistic)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.scenario_type.label().to_lowercase())
    }
}
