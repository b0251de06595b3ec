//! Load alerts from alerts.csv and save them back with their check state

use super::{Alert, AlertCondition, AlertStatus, AlertType};
use crate::error::LoadError;
use crate::scenario::loader::parse_optional_decimal;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use std::path::Path;

/// Default path to the alert file
pub const DEFAULT_ALERTS_PATH: &str = "data/alerts.csv";

/// Raw CSV row matching alerts.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: u32,
    name: String,
    alert_type: String,
    status: Option<String>,
    scenario_id: Option<u32>,
    target_value: Option<String>,
    target_roi: Option<String>,
    reminder_frequency_days: Option<u32>,
    message: Option<String>,
    send_email: Option<bool>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    next_reminder: Option<DateTime<Utc>>,
}

/// Row written back out; same columns as `CsvRow`
#[derive(Debug, serde::Serialize)]
struct CsvOutRow<'a> {
    id: u32,
    name: &'a str,
    alert_type: AlertType,
    status: AlertStatus,
    scenario_id: Option<u32>,
    target_value: Option<String>,
    target_roi: Option<String>,
    reminder_frequency_days: Option<u32>,
    message: &'a str,
    send_email: bool,
    created_at: DateTime<Utc>,
    triggered_at: Option<DateTime<Utc>>,
    last_checked: Option<DateTime<Utc>>,
    next_reminder: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Alert> for CsvOutRow<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            id: alert.id,
            name: &alert.name,
            alert_type: alert.condition.alert_type,
            status: alert.status,
            scenario_id: alert.scenario_id,
            target_value: alert.condition.target_value.map(|v| v.to_string()),
            target_roi: alert.condition.target_roi_pct.map(|v| v.to_string()),
            reminder_frequency_days: alert.reminder_frequency_days,
            message: &alert.message,
            send_email: alert.send_email,
            created_at: alert.created_at,
            triggered_at: alert.triggered_at,
            last_checked: alert.last_checked,
            next_reminder: alert.next_reminder,
        }
    }
}

impl CsvRow {
    fn to_alert(self, loaded_at: DateTime<Utc>) -> Result<Alert, LoadError> {
        let id = self.id;

        let alert_type = AlertType::from_key(&self.alert_type).ok_or_else(|| LoadError::InvalidField {
            id,
            field: "alert_type",
            value: self.alert_type.clone(),
        })?;

        let status = match self.status.as_deref() {
            None => AlertStatus::default(),
            Some(key) => AlertStatus::from_key(key).ok_or_else(|| LoadError::InvalidField {
                id,
                field: "status",
                value: key.to_string(),
            })?,
        };

        let condition = AlertCondition {
            alert_type,
            target_value: parse_optional_decimal(id, "target_value", self.target_value.as_deref())?,
            target_roi_pct: parse_optional_decimal(id, "target_roi", self.target_roi.as_deref())?,
        };

        Ok(Alert {
            id,
            name: self.name,
            condition,
            status,
            scenario_id: self.scenario_id,
            reminder_frequency_days: self.reminder_frequency_days,
            message: self.message.unwrap_or_default(),
            send_email: self.send_email.unwrap_or(false),
            created_at: self.created_at.unwrap_or(loaded_at),
            triggered_at: self.triggered_at,
            last_checked: self.last_checked,
            next_reminder: self.next_reminder,
        })
    }
}

/// Load all alerts from a CSV file
pub fn load_alerts<P: AsRef<Path>>(path: P) -> Result<Vec<Alert>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_alerts_from_reader(file)
}

/// Load alerts from any reader
pub fn load_alerts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Alert>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let loaded_at = Utc::now();
    let mut alerts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        alerts.push(row.to_alert(loaded_at)?);
    }

    log::debug!("Loaded {} alerts", alerts.len());
    Ok(alerts)
}

/// Load alerts from the default data/alerts.csv location
pub fn load_default_alerts() -> Result<Vec<Alert>, LoadError> {
    load_alerts(DEFAULT_ALERTS_PATH)
}

/// Save alerts, including trigger and reminder state, to a CSV file
pub fn write_alerts<P: AsRef<Path>>(path: P, alerts: &[Alert]) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_alerts_to_writer(file, alerts)
}

/// Save alerts to any writer in the format `load_alerts_from_reader` reads
pub fn write_alerts_to_writer<W: std::io::Write>(writer: W, alerts: &[Alert]) -> Result<(), LoadError> {
    let mut csv_writer = Writer::from_writer(writer);
    for alert in alerts {
        csv_writer.serialize(CsvOutRow::from(alert))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;

    log::debug!("Wrote {} alerts", alerts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::check_alerts;
    use crate::projection::ScenarioFigures;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    const HEADER: &str =
        "id,name,alert_type,status,scenario_id,target_value,target_roi,reminder_frequency_days,message,send_email\n";

    #[test]
    fn test_load_from_reader() {
        let csv = format!(
            "{HEADER}\
1,$100K Milestone,milestone,active,1,100000.00,,,You made it,true
2,Double up,roi,,1,,100,,,
3,Check in,reminder,disabled,,,,30,Review,false
"
        );
        let alerts = load_alerts_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(alerts.len(), 3);

        assert_eq!(alerts[0].alert_type(), AlertType::Milestone);
        assert_eq!(alerts[0].condition.target_value, Some(dec!(100000)));
        assert_eq!(alerts[0].scenario_id, Some(1));
        assert!(alerts[0].send_email);

        assert_eq!(alerts[1].status, AlertStatus::Active);
        assert_eq!(alerts[1].condition.target_roi_pct, Some(dec!(100)));
        assert_eq!(alerts[1].condition.target_value, None);
        assert_eq!(alerts[1].message, "");

        assert_eq!(alerts[2].status, AlertStatus::Disabled);
        assert_eq!(alerts[2].scenario_id, None);
        assert_eq!(alerts[2].reminder_frequency_days, Some(30));
    }

    #[test]
    fn test_unknown_alert_type_rejected() {
        let csv = format!("{HEADER}4,Odd,panic,active,1,1,,,,\n");
        assert!(matches!(
            load_alerts_from_reader(csv.as_bytes()),
            Err(LoadError::InvalidField { id: 4, field: "alert_type", .. })
        ));
    }

    #[test]
    fn test_state_columns_load() {
        let csv = "\
id,name,alert_type,status,scenario_id,target_value,target_roi,reminder_frequency_days,message,send_email,created_at,triggered_at,last_checked,next_reminder
1,300K,milestone,triggered,1,300000,,,,false,2025-01-01T00:00:00Z,2025-05-01T08:00:00Z,2025-05-01T08:00:00Z,
2,Review,reminder,active,,,,7,,false,,,,2025-05-08T08:00:00Z
";
        let alerts = load_alerts_from_reader(csv.as_bytes()).unwrap();

        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let checked = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(alerts[0].status, AlertStatus::Triggered);
        assert_eq!(alerts[0].created_at, created);
        assert_eq!(alerts[0].triggered_at, Some(checked));
        assert_eq!(alerts[0].last_checked, Some(checked));
        assert_eq!(alerts[0].next_reminder, None);

        assert_eq!(alerts[1].triggered_at, None);
        assert_eq!(alerts[1].next_reminder, Some(checked + Duration::days(7)));
    }

    #[test]
    fn test_loaded_due_reminder_fires() {
        let csv = "\
id,name,alert_type,status,scenario_id,target_value,target_roi,reminder_frequency_days,message,send_email,created_at,triggered_at,last_checked,next_reminder
5,Monthly Review,reminder,active,,,,30,Review your plan,false,,,2025-05-01T09:00:00Z,2025-05-31T09:00:00Z
";
        let mut alerts = load_alerts_from_reader(csv.as_bytes()).unwrap();
        let figures: HashMap<u32, ScenarioFigures> = HashMap::new();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        let report = check_alerts(&mut alerts, |id| figures.get(&id), now);

        assert_eq!(report.reminders_sent, 1);
        assert_eq!(report.notifications[0].title, "Reminder: Monthly Review");
        assert_eq!(alerts[0].next_reminder, Some(now + Duration::days(30)));
    }

    #[test]
    fn test_written_alerts_reload_with_state() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let mut milestone = Alert::new(
            1,
            "300K",
            AlertCondition::value_target(AlertType::Milestone, dec!(300000.50)),
            "Reached 300K, nice",
        )
        .for_scenario(1);
        milestone.status = AlertStatus::Triggered;
        milestone.triggered_at = Some(now);
        milestone.send_email = true;

        let mut review = Alert::new(
            2,
            "Review",
            AlertCondition {
                alert_type: AlertType::Reminder,
                target_value: None,
                target_roi_pct: None,
            },
            "",
        );
        review.reminder_frequency_days = Some(7);
        review.last_checked = Some(now);
        review.next_reminder = Some(now + Duration::days(7));

        let roi = Alert::new(3, "Double", AlertCondition::roi_target(dec!(100)), "").for_scenario(2);

        let mut buffer = Vec::new();
        write_alerts_to_writer(&mut buffer, &[milestone.clone(), review.clone(), roi]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("id,name,alert_type,status,"));
        assert!(text.contains(",milestone,triggered,"));

        let reloaded = load_alerts_from_reader(text.as_bytes()).unwrap();
        assert_eq!(reloaded.len(), 3);

        assert_eq!(reloaded[0].status, AlertStatus::Triggered);
        assert_eq!(reloaded[0].condition, milestone.condition);
        assert_eq!(reloaded[0].triggered_at, Some(now));
        assert_eq!(reloaded[0].created_at, milestone.created_at);
        assert_eq!(reloaded[0].message, "Reached 300K, nice");
        assert!(reloaded[0].send_email);

        assert_eq!(reloaded[1].status, AlertStatus::Active);
        assert_eq!(reloaded[1].scenario_id, None);
        assert_eq!(reloaded[1].next_reminder, review.next_reminder);
        assert_eq!(reloaded[1].last_checked, Some(now));

        assert_eq!(reloaded[2].condition.target_roi_pct, Some(dec!(100)));
        assert_eq!(reloaded[2].triggered_at, None);
    }

    #[test]
    fn test_default_data_file_loads() {
        let alerts = load_default_alerts().expect("Failed to load data/alerts.csv");
        assert!(!alerts.is_empty());
    }
}
