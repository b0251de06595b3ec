//! Projection output structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate figures an alert condition is evaluated against
///
/// Implemented by the full projection result, by individual yearly snapshots,
/// and by `ScenarioFigures` for figures restored from storage.
pub trait ProjectedFigures {
    fn projected_value(&self) -> Decimal;
    fn total_contributions(&self) -> Decimal;
    fn total_gains(&self) -> Decimal;

    /// Gains as a percentage of contributions, `None` when nothing was contributed
    fn roi_pct(&self) -> Option<Decimal> {
        let contributions = self.total_contributions();
        if contributions <= Decimal::ZERO {
            return None;
        }
        self.total_gains()
            .checked_div(contributions)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

/// Cumulative position at the end of one projection year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    /// Projection year (1-indexed)
    pub year: u32,
    pub value: Decimal,
    pub contributions_to_date: Decimal,
    pub gains_to_date: Decimal,
}

impl ProjectedFigures for YearlySnapshot {
    fn projected_value(&self) -> Decimal {
        self.value
    }

    fn total_contributions(&self) -> Decimal {
        self.contributions_to_date
    }

    fn total_gains(&self) -> Decimal {
        self.gains_to_date
    }
}

/// Stored figures of a scenario, without the snapshot series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFigures {
    pub projected_value: Decimal,
    pub total_contributions: Decimal,
    pub total_gains: Decimal,
}

impl ProjectedFigures for ScenarioFigures {
    fn projected_value(&self) -> Decimal {
        self.projected_value
    }

    fn total_contributions(&self) -> Decimal {
        self.total_contributions
    }

    fn total_gains(&self) -> Decimal {
        self.total_gains
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub projected_value: Decimal,
    pub total_contributions: Decimal,
    /// Always `projected_value - total_contributions`
    pub total_gains: Decimal,

    /// One entry per year, empty when snapshots were not requested
    pub snapshots: Vec<YearlySnapshot>,
}

impl ProjectionResult {
    /// Aggregate figures without the snapshot series
    pub fn figures(&self) -> ScenarioFigures {
        ScenarioFigures {
            projected_value: self.projected_value,
            total_contributions: self.total_contributions,
            total_gains: self.total_gains,
        }
    }

    /// Snapshot for a given year, if it was generated
    pub fn snapshot(&self, year: u32) -> Option<&YearlySnapshot> {
        self.snapshots.iter().find(|s| s.year == year)
    }
}

impl ProjectedFigures for ProjectionResult {
    fn projected_value(&self) -> Decimal {
        self.projected_value
    }

    fn total_contributions(&self) -> Decimal {
        self.total_contributions
    }

    fn total_gains(&self) -> Decimal {
        self.total_gains
    }
}
