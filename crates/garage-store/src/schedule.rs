//! Fleet-wide maintenance schedule views

use chrono::NaiveDate;
use serde::Serialize;

/// A scheduled service joined with its owning vehicle
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAppointment {
    /// e.g. `Car 'Beetle'`
    pub vehicle: String,
    pub date: NaiveDate,
    /// Formatted record line
    pub details: String,
}

/// When a due service reminder fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderDue {
    Today,
    Tomorrow,
}

/// A service due today or tomorrow
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub due: ReminderDue,
    pub vehicle: String,
    pub service_type: String,
}
