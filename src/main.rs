//! Scenario Forecaster CLI
//!
//! Command-line interface for running projections, comparing scenarios, and
//! checking alerts against CSV data files

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use scenario_forecaster::{
    alerts::{self, loader::DEFAULT_ALERTS_PATH, NotificationInbox},
    runner::ScenarioRunner,
    scenario::{self, loader::DEFAULT_SCENARIOS_PATH},
    project, ProjectionResult, ScenarioParameters, YearlySnapshot,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scenario_forecaster")]
#[command(about = "Compound-growth projections for investment scenarios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single scenario given on the command line
    Project {
        /// Initial investment
        #[arg(long)]
        initial: Decimal,

        /// Monthly contribution
        #[arg(long, default_value = "0")]
        monthly: Decimal,

        /// Expected annual return in percent (7 means 7%)
        #[arg(long)]
        rate: Decimal,

        /// Investment period in years
        #[arg(long)]
        years: u32,

        /// Write the yearly snapshots to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Project every scenario in a CSV file and write all snapshots
    Batch {
        #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
        scenarios: PathBuf,

        #[arg(long, default_value = "scenario_snapshots.csv")]
        output: PathBuf,
    },
    /// Compare scenarios side by side (newest three when no ids are given)
    Compare {
        #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
        scenarios: PathBuf,

        /// Scenario ids to compare, comma separated
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u32>,
    },
    /// Check all active alerts against the projected scenarios
    CheckAlerts {
        #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
        scenarios: PathBuf,

        #[arg(long, default_value = DEFAULT_ALERTS_PATH)]
        alerts: PathBuf,

        /// Save the updated alerts (status, trigger and reminder times) here
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Snapshot row as written to CSV output
#[derive(Debug, Serialize)]
struct SnapshotCsvRow {
    scenario_id: u32,
    year: u32,
    value: Decimal,
    contributions_to_date: Decimal,
    gains_to_date: Decimal,
}

impl SnapshotCsvRow {
    fn new(scenario_id: u32, snapshot: &YearlySnapshot) -> Self {
        Self {
            scenario_id,
            year: snapshot.year,
            value: snapshot.value,
            contributions_to_date: snapshot.contributions_to_date,
            gains_to_date: snapshot.gains_to_date,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Project {
            initial,
            monthly,
            rate,
            years,
            output,
        } => run_project(initial, monthly, rate, years, output.as_deref()),
        Commands::Batch { scenarios, output } => run_batch(&scenarios, &output),
        Commands::Compare { scenarios, ids } => run_compare(&scenarios, &ids),
        Commands::CheckAlerts {
            scenarios,
            alerts,
            output,
        } => run_check_alerts(&scenarios, &alerts, output.as_deref()),
    }
}

fn run_project(
    initial: Decimal,
    monthly: Decimal,
    rate: Decimal,
    years: u32,
    output: Option<&Path>,
) -> Result<()> {
    let params = ScenarioParameters::new(initial, rate, years).with_monthly_contribution(monthly);
    let result = project(&params).context("projection failed")?;

    println!("Scenario Projection");
    println!("===================\n");
    println!("  Initial Investment:   ${:.2}", params.initial_investment);
    println!("  Monthly Contribution: ${:.2}", params.monthly_contribution);
    println!("  Annual Return:        {}%", params.annual_return_rate_pct);
    println!("  Period:               {} years\n", params.investment_period_years);

    print_snapshots(&result);
    print_summary(&result);

    if let Some(path) = output {
        write_snapshots(path, result.snapshots.iter().map(|s| SnapshotCsvRow::new(0, s)))?;
        println!("\nSnapshots written to: {}", path.display());
    }
    Ok(())
}

fn run_batch(scenarios_path: &Path, output: &Path) -> Result<()> {
    let scenarios = scenario::load_scenarios(scenarios_path)
        .with_context(|| format!("loading scenarios from {}", scenarios_path.display()))?;
    println!("Loaded {} scenarios", scenarios.len());

    let projections = ScenarioRunner::new().run_batch(&scenarios);

    let mut rows = Vec::new();
    for projection in &projections {
        match &projection.result {
            Ok(result) => {
                println!(
                    "  Scenario {:>4}: projected ${:>14.2}  gains ${:>14.2}",
                    projection.scenario_id, result.projected_value, result.total_gains
                );
                rows.extend(
                    result
                        .snapshots
                        .iter()
                        .map(|s| SnapshotCsvRow::new(projection.scenario_id, s)),
                );
            }
            Err(err) => println!("  Scenario {:>4}: rejected ({})", projection.scenario_id, err),
        }
    }

    write_snapshots(output, rows)?;
    println!("\nSnapshots written to: {}", output.display());
    Ok(())
}

fn run_compare(scenarios_path: &Path, ids: &[u32]) -> Result<()> {
    let scenarios = scenario::load_scenarios(scenarios_path)
        .with_context(|| format!("loading scenarios from {}", scenarios_path.display()))?;

    let rows = ScenarioRunner::new().compare(&scenarios, ids);
    if rows.is_empty() {
        bail!("no scenarios to compare");
    }

    println!(
        "{:>4} {:<32} {:>12} {:>10} {:>7} {:>5} {:>14} {:>14} {:>9}",
        "ID", "Name", "Initial", "Monthly", "Rate%", "Yrs", "Projected", "Gains", "ROI%"
    );
    println!("{}", "-".repeat(118));
    for row in &rows {
        let roi = row
            .roi_pct
            .map(|roi| format!("{:.2}", roi))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4} {:<32} {:>12.2} {:>10.2} {:>7.2} {:>5} {:>14.2} {:>14.2} {:>9}",
            row.scenario_id,
            row.name,
            row.initial_investment,
            row.monthly_contribution,
            row.annual_return_rate_pct,
            row.investment_period_years,
            row.projected_value,
            row.total_gains,
            roi,
        );
    }
    Ok(())
}

fn run_check_alerts(scenarios_path: &Path, alerts_path: &Path, output: Option<&Path>) -> Result<()> {
    let scenarios = scenario::load_scenarios(scenarios_path)
        .with_context(|| format!("loading scenarios from {}", scenarios_path.display()))?;
    let mut alert_list = alerts::load_alerts(alerts_path)
        .with_context(|| format!("loading alerts from {}", alerts_path.display()))?;

    let figures: HashMap<u32, ProjectionResult> = ScenarioRunner::new()
        .run_batch(&scenarios)
        .into_iter()
        .filter_map(|p| p.result.ok().map(|result| (p.scenario_id, result)))
        .collect();

    let report = alerts::check_alerts(&mut alert_list, |id| figures.get(&id), Utc::now());

    let mut inbox = NotificationInbox::new();
    inbox.extend(report.notifications.iter().cloned());

    for notification in inbox.newest_first() {
        println!("[{:?}] {}", notification.notification_type, notification.title);
        if !notification.message.is_empty() {
            println!("    {}", notification.message);
        }
    }
    for request in report.email_requests() {
        println!("  (email requested for alert {:?})", request.alert_id);
    }

    println!("\n{}", report.summary());
    println!("Unread notifications: {}", inbox.unread_count());

    if let Some(path) = output {
        alerts::write_alerts(path, &alert_list)
            .with_context(|| format!("saving alerts to {}", path.display()))?;
        println!("Alerts saved to: {}", path.display());
    }
    Ok(())
}

fn print_snapshots(result: &ProjectionResult) {
    println!("{:>5} {:>16} {:>16} {:>16}", "Year", "Value", "Contributions", "Gains");
    println!("{}", "-".repeat(56));
    for snapshot in &result.snapshots {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2}",
            snapshot.year, snapshot.value, snapshot.contributions_to_date, snapshot.gains_to_date
        );
    }
}

fn print_summary(result: &ProjectionResult) {
    println!("\nSummary:");
    println!("  Projected Value:     ${:.2}", result.projected_value);
    println!("  Total Contributions: ${:.2}", result.total_contributions);
    println!("  Total Gains:         ${:.2}", result.total_gains);
}

fn write_snapshots(path: &Path, rows: impl IntoIterator<Item = SnapshotCsvRow>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
