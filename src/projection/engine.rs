//! Core projection engine for compound-growth scenario projections

use rust_decimal::{Decimal, MathematicalOps};

use super::results::{ProjectionResult, YearlySnapshot};
use super::rounding::round_money;
use crate::error::{DomainError, ProjectionError, Result};
use crate::scenario::ScenarioParameters;

const MONTHS_PER_YEAR: u32 = 12;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether to generate the yearly snapshot series alongside the aggregate
    pub include_snapshots: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_snapshots: true,
        }
    }
}

/// Main projection engine
///
/// Stateless apart from its configuration: every call recomputes from the
/// parameters, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project a scenario to the end of its horizon
    pub fn project(&self, params: &ScenarioParameters) -> Result<ProjectionResult> {
        let monthly_rate = validated_monthly_rate(params)?;
        let end = position_at_year(params, monthly_rate, params.investment_period_years)?;

        let snapshots = if self.config.include_snapshots {
            snapshot_series(params, monthly_rate)?
        } else {
            Vec::new()
        };

        log::debug!(
            "Projected {} years at {}%: value={} contributions={}",
            params.investment_period_years,
            params.annual_return_rate_pct,
            end.value,
            end.contributions_to_date,
        );

        Ok(ProjectionResult {
            projected_value: end.value,
            total_contributions: end.contributions_to_date,
            total_gains: end.gains_to_date,
            snapshots,
        })
    }

    /// Regenerate the full yearly snapshot series from scratch
    pub fn generate_snapshots(&self, params: &ScenarioParameters) -> Result<Vec<YearlySnapshot>> {
        let monthly_rate = validated_monthly_rate(params)?;
        snapshot_series(params, monthly_rate)
    }
}

/// Project a scenario with the default configuration (snapshots included)
pub fn project(params: &ScenarioParameters) -> Result<ProjectionResult> {
    ProjectionEngine::default().project(params)
}

/// Yearly snapshots for years 1..=N
pub fn generate_snapshots(params: &ScenarioParameters) -> Result<Vec<YearlySnapshot>> {
    ProjectionEngine::default().generate_snapshots(params)
}

/// Monthly rate `annual% / 100 / 12`, rejecting inputs the formula cannot handle
fn validated_monthly_rate(params: &ScenarioParameters) -> Result<Decimal> {
    if params.investment_period_years < 1 {
        return Err(DomainError::InvalidPeriod {
            years: params.investment_period_years,
        }
        .into());
    }

    let monthly_rate =
        params.annual_return_rate_pct / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR);

    if Decimal::ONE + monthly_rate <= Decimal::ZERO {
        return Err(DomainError::NonPositiveGrowthFactor {
            annual_rate_pct: params.annual_return_rate_pct,
        }
        .into());
    }

    Ok(monthly_rate)
}

fn snapshot_series(params: &ScenarioParameters, monthly_rate: Decimal) -> Result<Vec<YearlySnapshot>> {
    (1..=params.investment_period_years)
        .map(|year| position_at_year(params, monthly_rate, year))
        .collect()
}

/// Evaluate the closed-form future value after `year` whole years
///
/// FV = P(1+r)^n + PMT((1+r)^n - 1)/r, or P + PMT*n when r is zero.
/// The aggregate result and every snapshot go through here so they share
/// one rounding path.
fn position_at_year(params: &ScenarioParameters, monthly_rate: Decimal, year: u32) -> Result<YearlySnapshot> {
    let months = year
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or(ProjectionError::Overflow { months: u32::MAX })?;
    let overflow = || ProjectionError::Overflow { months };

    let periods = Decimal::from(months);
    let principal = params.initial_investment;
    let payment = params.monthly_contribution;

    let contributions = payment
        .checked_mul(periods)
        .and_then(|paid| principal.checked_add(paid))
        .ok_or_else(overflow)?;

    let value = if monthly_rate.is_zero() {
        contributions
    } else {
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powi(i64::from(months))
            .ok_or_else(overflow)?;
        let lump_sum = principal.checked_mul(growth).ok_or_else(overflow)?;
        let annuity = (growth - Decimal::ONE)
            .checked_div(monthly_rate)
            .and_then(|factor| payment.checked_mul(factor))
            .ok_or_else(overflow)?;
        lump_sum.checked_add(annuity).ok_or_else(overflow)?
    };

    let value = round_money(value);
    let contributions_to_date = round_money(contributions);
    let gains_to_date = value.checked_sub(contributions_to_date).ok_or_else(overflow)?;

    Ok(YearlySnapshot {
        year,
        value,
        contributions_to_date,
        gains_to_date,
    })
}
