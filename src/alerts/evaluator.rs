//! Alert condition evaluation against projected figures

use rust_decimal::Decimal;

use super::types::{Alert, AlertCondition, AlertType};
use crate::projection::ProjectedFigures;

/// Whether `condition` is met by `figures`
///
/// Threshold, milestone and goal are three names for one rule: the projected
/// value has reached the target (inclusive). A zero or missing target never
/// matches. Reminders are time-driven and always evaluate to false here.
pub fn evaluate<F: ProjectedFigures + ?Sized>(condition: &AlertCondition, figures: &F) -> bool {
    match condition.alert_type {
        AlertType::Threshold | AlertType::Milestone | AlertType::Goal => {
            match set_target(condition.target_value) {
                Some(target) => figures.projected_value() >= target,
                None => false,
            }
        }
        AlertType::Roi => match (set_target(condition.target_roi_pct), figures.roi_pct()) {
            (Some(target), Some(roi)) => roi >= target,
            _ => false,
        },
        AlertType::Reminder => false,
    }
}

fn set_target(target: Option<Decimal>) -> Option<Decimal> {
    target.filter(|value| !value.is_zero())
}

impl Alert {
    /// Evaluate this alert against its linked scenario's figures
    ///
    /// Returns false without looking at the condition when the alert is not
    /// active or no figures are available for it.
    pub fn check_condition<F: ProjectedFigures + ?Sized>(&self, figures: Option<&F>) -> bool {
        if !self.is_active() {
            return false;
        }
        match figures {
            Some(figures) => evaluate(&self.condition, figures),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertStatus;
    use crate::projection::ScenarioFigures;
    use rust_decimal_macros::dec;

    fn figures(value: Decimal, contributions: Decimal) -> ScenarioFigures {
        ScenarioFigures {
            projected_value: value,
            total_contributions: contributions,
            total_gains: value - contributions,
        }
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let condition = AlertCondition::value_target(AlertType::Threshold, dec!(100000));

        assert!(evaluate(&condition, &figures(dec!(100000.00), dec!(60000))));
        assert!(!evaluate(&condition, &figures(dec!(99999.99), dec!(60000))));
    }

    #[test]
    fn test_value_aliases_share_one_rule() {
        let f = figures(dec!(250000), dec!(100000));

        for alert_type in [AlertType::Threshold, AlertType::Milestone, AlertType::Goal] {
            assert!(evaluate(&AlertCondition::value_target(alert_type, dec!(250000)), &f));
            assert!(!evaluate(&AlertCondition::value_target(alert_type, dec!(250000.01)), &f));
        }
    }

    #[test]
    fn test_missing_or_zero_value_target_never_matches() {
        let f = figures(dec!(1000), dec!(500));
        let missing = AlertCondition {
            alert_type: AlertType::Goal,
            target_value: None,
            target_roi_pct: Some(dec!(1)),
        };

        assert!(!evaluate(&missing, &f));
        assert!(!evaluate(&AlertCondition::value_target(AlertType::Threshold, Decimal::ZERO), &f));
    }

    #[test]
    fn test_roi_target() {
        let condition = AlertCondition::roi_target(dec!(50));

        assert!(evaluate(&condition, &figures(dec!(150000), dec!(100000))));
        assert!(!evaluate(&condition, &figures(dec!(149999), dec!(100000))));
    }

    #[test]
    fn test_roi_without_contributions_is_false() {
        let condition = AlertCondition::roi_target(dec!(50));
        assert!(!evaluate(&condition, &figures(dec!(1000), Decimal::ZERO)));
    }

    #[test]
    fn test_roi_ignores_value_target() {
        let condition = AlertCondition {
            alert_type: AlertType::Roi,
            target_value: Some(dec!(1)),
            target_roi_pct: None,
        };
        assert!(!evaluate(&condition, &figures(dec!(1000000), dec!(1))));
    }

    #[test]
    fn test_reminder_never_matches() {
        let condition = AlertCondition {
            alert_type: AlertType::Reminder,
            target_value: Some(dec!(1)),
            target_roi_pct: Some(dec!(1)),
        };
        assert!(!evaluate(&condition, &figures(dec!(1000000), dec!(1))));
    }

    #[test]
    fn test_evaluates_projection_output() {
        let params = crate::scenario::ScenarioParameters::new(dec!(10000), dec!(7), 20)
            .with_monthly_contribution(dec!(500));
        let result = crate::projection::project(&params).unwrap();

        assert!(evaluate(&AlertCondition::value_target(AlertType::Milestone, dec!(300000)), &result));
        assert!(evaluate(&AlertCondition::roi_target(dec!(130)), &result));
        assert!(!evaluate(&AlertCondition::roi_target(dec!(132)), &result));

        let year_ten = result.snapshot(10).unwrap();
        assert!(!evaluate(&AlertCondition::value_target(AlertType::Goal, dec!(300000)), year_ten));
    }

    #[test]
    fn test_check_condition_requires_active_and_figures() {
        let f = figures(dec!(500000), dec!(100000));
        let mut alert = Alert::new(1, "Half million", AlertCondition::value_target(AlertType::Goal, dec!(500000)), "")
            .for_scenario(9);

        assert!(alert.check_condition(Some(&f)));
        assert!(!alert.check_condition::<ScenarioFigures>(None));

        alert.status = AlertStatus::Disabled;
        assert!(!alert.check_condition(Some(&f)));

        alert.status = AlertStatus::Triggered;
        assert!(!alert.check_condition(Some(&f)));
    }
}
