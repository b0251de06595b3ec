//! Alert definitions, evaluation, and the on-demand check pass
//!
//! - **evaluator**: pure predicate over an alert condition and projected figures
//! - **monitor**: walks a user's alerts, triggers the ones whose condition holds,
//!   schedules reminders, and produces notifications
//! - **notification**: notification records and an in-memory inbox

mod types;
mod evaluator;
pub mod monitor;
mod notification;
pub mod loader;

pub use types::{Alert, AlertCondition, AlertStatus, AlertType};
pub use evaluator::evaluate;
pub use monitor::{check_alerts, CheckReport};
pub use notification::{Notification, NotificationInbox, NotificationType};
pub use loader::{load_alerts, load_alerts_from_reader, load_default_alerts, write_alerts, write_alerts_to_writer};
