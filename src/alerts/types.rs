//! Alert records and the condition they carry

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of condition an alert watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Milestone reached
    Milestone,
    /// Investment goal
    Goal,
    /// Value threshold
    Threshold,
    /// ROI target
    Roi,
    /// Periodic reminder, fired on a schedule rather than on figures
    Reminder,
}

impl AlertType {
    /// Parse the lowercase key used in CSV files and requests
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "milestone" => Some(AlertType::Milestone),
            "goal" => Some(AlertType::Goal),
            "threshold" => Some(AlertType::Threshold),
            "roi" => Some(AlertType::Roi),
            "reminder" => Some(AlertType::Reminder),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertType::Milestone => "Milestone Reached",
            AlertType::Goal => "Investment Goal",
            AlertType::Threshold => "Value Threshold",
            AlertType::Roi => "ROI Target",
            AlertType::Reminder => "Periodic Reminder",
        }
    }
}

/// Lifecycle state of an alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Triggered,
    Disabled,
}

impl AlertStatus {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "active" => Some(AlertStatus::Active),
            "triggered" => Some(AlertStatus::Triggered),
            "disabled" => Some(AlertStatus::Disabled),
            _ => None,
        }
    }
}

/// The part of an alert the evaluator looks at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCondition {
    pub alert_type: AlertType,

    /// Portfolio value to reach (threshold, milestone, goal)
    #[serde(default)]
    pub target_value: Option<Decimal>,

    /// ROI percentage to reach (roi)
    #[serde(default)]
    pub target_roi_pct: Option<Decimal>,
}

impl AlertCondition {
    pub fn value_target(alert_type: AlertType, target_value: Decimal) -> Self {
        Self {
            alert_type,
            target_value: Some(target_value),
            target_roi_pct: None,
        }
    }

    pub fn roi_target(target_roi_pct: Decimal) -> Self {
        Self {
            alert_type: AlertType::Roi,
            target_value: None,
            target_roi_pct: Some(target_roi_pct),
        }
    }
}

/// A user-defined alert over one scenario's projected figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub name: String,
    pub condition: AlertCondition,

    #[serde(default)]
    pub status: AlertStatus,

    /// Linked scenario; alerts without one never trigger on figures
    #[serde(default)]
    pub scenario_id: Option<u32>,

    /// Days between reminders (reminder alerts only)
    #[serde(default)]
    pub reminder_frequency_days: Option<u32>,

    /// Text shown in the notification when the alert fires
    pub message: String,

    /// Ask the caller to also deliver the notification by email
    #[serde(default)]
    pub send_email: bool,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_reminder: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn new(id: u32, name: impl Into<String>, condition: AlertCondition, message: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            condition,
            status: AlertStatus::Active,
            scenario_id: None,
            reminder_frequency_days: None,
            message: message.into(),
            send_email: false,
            created_at: Utc::now(),
            triggered_at: None,
            last_checked: None,
            next_reminder: None,
        }
    }

    pub fn for_scenario(mut self, scenario_id: u32) -> Self {
        self.scenario_id = Some(scenario_id);
        self
    }

    pub fn alert_type(&self) -> AlertType {
        self.condition.alert_type
    }

    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// Flip between active and disabled
    ///
    /// Re-activating clears the trigger timestamp so the alert can fire
    /// again. Triggered alerts are left as they are.
    pub fn toggle(&mut self) -> AlertStatus {
        match self.status {
            AlertStatus::Active => self.status = AlertStatus::Disabled,
            AlertStatus::Disabled => {
                self.status = AlertStatus::Active;
                self.triggered_at = None;
            }
            AlertStatus::Triggered => {}
        }
        self.status
    }

    /// Interval between reminders, if this alert has one
    pub fn reminder_interval(&self) -> Option<Duration> {
        match (self.condition.alert_type, self.reminder_frequency_days) {
            (AlertType::Reminder, Some(days)) if days > 0 => Some(Duration::days(i64::from(days))),
            _ => None,
        }
    }
}
