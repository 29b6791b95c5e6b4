//! Derived attendance records and period aggregates.

use serde::{Deserialize, Serialize};

/// One employee's attendance for one calendar day, derived from that day's
/// punches and the employee's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DerivedDayRecord {
    pub pin: String,
    pub display_name: String,
    pub department: String,
    pub position: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// The chronologically earliest punch of the day, verbatim.
    pub entry_timestamp: String,
    /// Entry wall-clock time, `HH:MM`.
    pub entry_time: String,
    /// The punch counted as the checkout, when one was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<String>,
    pub scheduled_entry: String,
    pub scheduled_exit: String,
    /// Entry time-of-day minus scheduled entry, in minutes. Negative when the
    /// employee arrived early.
    pub diff_minutes: i32,
    pub is_late: bool,
    /// More than two punches recorded that day.
    pub has_multiple_punches: bool,
}

impl DerivedDayRecord {
    /// Month-prefix filter (`date` starts with `YYYY-MM`).
    pub fn in_month(&self, month: &str) -> bool {
        self.date.starts_with(month)
    }

    /// Exact-day filter.
    pub fn on_day(&self, day: &str) -> bool {
        self.date == day
    }

    /// Per-employee filter.
    pub fn for_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    /// Per-department filter.
    pub fn in_department(&self, department: &str) -> bool {
        self.department == department
    }
}

/// Aggregate counts over a set of derived day records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceStats {
    pub total: i64,
    pub on_time: i64,
    pub late: i64,
    /// Days flagged with the multiple-punch anomaly.
    pub alerts: i64,
}

/// On-time/late tally for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DepartmentRollup {
    pub department: String,
    pub on_time: i64,
    pub late: i64,
}

/// On-time/late tally for one `"entry - exit"` schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleRollup {
    pub schedule: String,
    pub on_time: i64,
    pub late: i64,
}

/// An employee flagged for repeated lateness within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChronicAlert {
    pub pin: String,
    pub display_name: String,
    /// Number of late days in the month; always >= 3.
    pub late_days: i64,
}
