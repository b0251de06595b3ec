//! On-demand alert check pass
//!
//! Walks a user's alerts once, moves the ones whose condition holds to
//! `Triggered` and turns each firing into a `Notification`. Persisting the
//! updated alerts and delivering email stay with the caller.

use chrono::{DateTime, Utc};

use super::notification::{Notification, NotificationType};
use super::types::{Alert, AlertStatus, AlertType};
use crate::projection::ProjectedFigures;

/// Outcome of one check pass
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Active alerts looked at
    pub checked: usize,
    /// Alerts moved to `Triggered`
    pub triggered: usize,
    /// Reminder notifications emitted
    pub reminders_sent: usize,
    /// Notifications in alert order
    pub notifications: Vec<Notification>,
}

impl CheckReport {
    /// Message shown to the user after a manual check
    pub fn summary(&self) -> String {
        if self.triggered > 0 {
            format!("{} alert(s) triggered!", self.triggered)
        } else {
            "No alerts triggered. All conditions are within normal ranges.".to_string()
        }
    }

    /// Notifications whose alert asked for email delivery
    pub fn email_requests(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| n.send_email)
    }
}

/// Check every active alert once
///
/// `figures_for` resolves a scenario id to its current projected figures.
/// Alerts that are disabled or already triggered are skipped. Reminder
/// alerts are scheduled here instead of being evaluated on figures.
pub fn check_alerts<'a, F, L>(alerts: &mut [Alert], figures_for: L, now: DateTime<Utc>) -> CheckReport
where
    F: ProjectedFigures + 'a,
    L: Fn(u32) -> Option<&'a F>,
{
    let mut report = CheckReport::default();

    for alert in alerts.iter_mut().filter(|a| a.is_active()) {
        report.checked += 1;
        alert.last_checked = Some(now);

        if alert.alert_type() == AlertType::Reminder {
            if let Some(notification) = advance_reminder(alert, now) {
                report.reminders_sent += 1;
                report.notifications.push(notification);
            }
            continue;
        }

        let figures = alert.scenario_id.and_then(&figures_for);
        if alert.check_condition(figures) {
            alert.status = AlertStatus::Triggered;
            alert.triggered_at = Some(now);
            report.triggered += 1;

            log::debug!("Alert {} ({}) triggered", alert.id, alert.name);
            report.notifications.push(alert_notification(alert, now));
        }
    }

    log::info!(
        "Checked {} alerts: {} triggered, {} reminders",
        report.checked,
        report.triggered,
        report.reminders_sent
    );
    report
}

fn alert_notification(alert: &Alert, now: DateTime<Utc>) -> Notification {
    let mut notification = Notification::new(
        NotificationType::Alert,
        format!("Alert Triggered: {}", alert.name),
        alert.message.clone(),
        now,
    );
    notification.alert_id = Some(alert.id);
    notification.scenario_id = alert.scenario_id;
    notification.send_email = alert.send_email;
    notification
}

/// Fire a due reminder and schedule the next one
///
/// The first pass only schedules; a reminder without a frequency never fires.
fn advance_reminder(alert: &mut Alert, now: DateTime<Utc>) -> Option<Notification> {
    let interval = alert.reminder_interval()?;

    match alert.next_reminder {
        None => {
            alert.next_reminder = Some(now + interval);
            None
        }
        Some(due) if due <= now => {
            alert.next_reminder = Some(now + interval);

            let mut notification = Notification::new(
                NotificationType::Info,
                format!("Reminder: {}", alert.name),
                alert.message.clone(),
                now,
            );
            notification.alert_id = Some(alert.id);
            notification.scenario_id = alert.scenario_id;
            notification.send_email = alert.send_email;
            Some(notification)
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertCondition;
    use crate::projection::ScenarioFigures;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn figures() -> HashMap<u32, ScenarioFigures> {
        HashMap::from([(
            1,
            ScenarioFigures {
                projected_value: dec!(300850.72),
                total_contributions: dec!(130000),
                total_gains: dec!(170850.72),
            },
        )])
    }

    fn reminder(days: u32) -> Alert {
        let mut alert = Alert::new(
            50,
            "Monthly review",
            AlertCondition {
                alert_type: AlertType::Reminder,
                target_value: None,
                target_roi_pct: None,
            },
            "Time to review your plan",
        );
        alert.reminder_frequency_days = Some(days);
        alert
    }

    #[test]
    fn test_met_condition_triggers_once() {
        let figures = figures();
        let mut alerts = vec![
            Alert::new(1, "300K", AlertCondition::value_target(AlertType::Milestone, dec!(300000)), "Reached 300K")
                .for_scenario(1),
            Alert::new(2, "1M", AlertCondition::value_target(AlertType::Goal, dec!(1000000)), "Millionaire")
                .for_scenario(1),
        ];
        alerts[0].send_email = true;

        let report = check_alerts(&mut alerts, |id| figures.get(&id), now());

        assert_eq!(report.checked, 2);
        assert_eq!(report.triggered, 1);
        assert_eq!(alerts[0].status, AlertStatus::Triggered);
        assert_eq!(alerts[0].triggered_at, Some(now()));
        assert_eq!(alerts[1].status, AlertStatus::Active);
        assert_eq!(alerts[1].last_checked, Some(now()));

        let notification = &report.notifications[0];
        assert_eq!(notification.title, "Alert Triggered: 300K");
        assert_eq!(notification.message, "Reached 300K");
        assert_eq!(notification.notification_type, NotificationType::Alert);
        assert_eq!(notification.alert_id, Some(1));
        assert_eq!(notification.scenario_id, Some(1));
        assert_eq!(report.email_requests().count(), 1);
        assert_eq!(report.summary(), "1 alert(s) triggered!");

        let second = check_alerts(&mut alerts, |id| figures.get(&id), now() + Duration::hours(1));
        assert_eq!(second.checked, 1);
        assert_eq!(second.triggered, 0);
        assert!(second.notifications.is_empty());
    }

    #[test]
    fn test_roi_target_against_linked_figures() {
        // 170850.72 / 130000 is roughly 131.42%
        let figures = figures();
        let mut alerts = vec![
            Alert::new(10, "130% ROI", AlertCondition::roi_target(dec!(130)), "").for_scenario(1),
            Alert::new(11, "132% ROI", AlertCondition::roi_target(dec!(132)), "").for_scenario(1),
        ];

        let report = check_alerts(&mut alerts, |id| figures.get(&id), now());

        assert_eq!(report.checked, 2);
        assert_eq!(report.triggered, 1);
        assert_eq!(alerts[0].status, AlertStatus::Triggered);
        assert_eq!(alerts[1].status, AlertStatus::Active);
        assert_eq!(report.notifications[0].alert_id, Some(10));
        assert_eq!(report.notifications[0].title, "Alert Triggered: 130% ROI");
    }

    #[test]
    fn test_unlinked_and_disabled_alerts_do_not_fire() {
        let figures = figures();
        let mut unlinked = Alert::new(1, "Any", AlertCondition::roi_target(dec!(10)), "");
        let mut disabled =
            Alert::new(2, "Off", AlertCondition::roi_target(dec!(10)), "").for_scenario(1);
        disabled.status = AlertStatus::Disabled;
        let missing = Alert::new(3, "Gone", AlertCondition::roi_target(dec!(10)), "").for_scenario(99);
        unlinked.send_email = true;

        let mut alerts = vec![unlinked, disabled, missing];
        let report = check_alerts(&mut alerts, |id| figures.get(&id), now());

        assert_eq!(report.checked, 2);
        assert_eq!(report.triggered, 0);
        assert_eq!(alerts[1].last_checked, None);
        assert_eq!(
            report.summary(),
            "No alerts triggered. All conditions are within normal ranges."
        );
    }

    #[test]
    fn test_reminder_schedule() {
        let figures = figures();
        let mut alerts = vec![reminder(7)];

        let first = check_alerts(&mut alerts, |id| figures.get(&id), now());
        assert_eq!(first.reminders_sent, 0);
        assert_eq!(alerts[0].next_reminder, Some(now() + Duration::days(7)));

        let early = check_alerts(&mut alerts, |id| figures.get(&id), now() + Duration::days(3));
        assert_eq!(early.reminders_sent, 0);

        let due = now() + Duration::days(7);
        let report = check_alerts(&mut alerts, |id| figures.get(&id), due);
        assert_eq!(report.reminders_sent, 1);
        assert_eq!(report.triggered, 0);
        assert_eq!(report.notifications[0].title, "Reminder: Monthly review");
        assert_eq!(report.notifications[0].notification_type, NotificationType::Info);
        assert_eq!(alerts[0].status, AlertStatus::Active);
        assert_eq!(alerts[0].next_reminder, Some(due + Duration::days(7)));
    }

    #[test]
    fn test_reminder_without_frequency_is_inert() {
        let figures = figures();
        let mut alert = reminder(0);
        alert.reminder_frequency_days = None;
        let mut alerts = vec![alert];

        let report = check_alerts(&mut alerts, |id| figures.get(&id), now());
        assert_eq!(report.checked, 1);
        assert!(report.notifications.is_empty());
        assert_eq!(alerts[0].next_reminder, None);
    }
}
