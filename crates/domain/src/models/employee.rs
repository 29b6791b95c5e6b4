//! Employee schedule model and roster-row normalization.

use serde::{Deserialize, Serialize};
use shared::timeparse::hhmm;
use validator::Validate;

/// Fallback entry time when the roster row carries none.
pub const DEFAULT_ENTRY_TIME: &str = "09:00";

/// Fallback exit time when the roster row carries none.
pub const DEFAULT_EXIT_TIME: &str = "18:00";

/// Tolerance assumed for legacy free-text values with no parsable number.
const LEGACY_TOLERANCE_MINUTES: i32 = 19;

lazy_static::lazy_static! {
    static ref INTEGER_REGEX: regex::Regex = regex::Regex::new(r"\d+").unwrap();
}

/// Per-employee schedule, normalized and default-filled.
///
/// Read-only to the derivation engine; mutated only through the explicit
/// roster update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmployeeSchedule {
    pub pin: String,
    pub display_name: String,
    pub department: String,
    pub position: String,
    pub legal_entity: String,
    /// Expected entry time-of-day, `HH:MM`.
    pub scheduled_entry: String,
    /// Expected exit time-of-day, `HH:MM`.
    pub scheduled_exit: String,
    /// Grace period after the scheduled entry before a punch counts as late.
    pub tolerance_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_minutes: Option<i32>,
    pub active: bool,
}

impl EmployeeSchedule {
    /// The `"entry - exit"` label used for schedule filters and rollups.
    pub fn schedule_label(&self) -> String {
        format!("{} - {}", self.scheduled_entry, self.scheduled_exit)
    }
}

/// A roster row as it comes out of storage or a legacy import, before
/// normalization. Every field except the pin may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawEmployeeRow {
    pub pin: String,
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub legal_entity: Option<String>,
    /// Stored as `HH:MM` or `HH:MM:SS`.
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub tolerance_minutes: Option<i32>,
    /// Legacy imports carry tolerance as free text, e.g. `"19 min"`.
    pub tolerance_text: Option<String>,
    pub meal_minutes: Option<i32>,
    pub active: Option<bool>,
}

impl RawEmployeeRow {
    /// Normalizes this row into an [`EmployeeSchedule`], applying defaults for
    /// every absent field. Never fails: a roster row with nothing but a pin
    /// still yields a usable schedule.
    pub fn normalize(self) -> EmployeeSchedule {
        let pin = self.pin.trim().to_string();
        let display_name = match self.display_name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            _ => format!("PIN {pin}"),
        };
        let tolerance_minutes = match (self.tolerance_minutes, self.tolerance_text) {
            (Some(minutes), _) => minutes,
            (None, Some(text)) => tolerance_from_text(&text),
            (None, None) => 0,
        };
        EmployeeSchedule {
            pin,
            display_name,
            department: or_placeholder(self.department),
            position: or_placeholder(self.position),
            legal_entity: or_placeholder(self.legal_entity),
            scheduled_entry: time_or(self.entry_time, DEFAULT_ENTRY_TIME),
            scheduled_exit: time_or(self.exit_time, DEFAULT_EXIT_TIME),
            tolerance_minutes,
            meal_minutes: self.meal_minutes,
            active: self.active.unwrap_or(true),
        }
    }
}

/// Parses a tolerance window out of legacy free text (`"19 min"`, `"15"`).
///
/// The first integer literal wins; text with no number falls back to the
/// historical 19-minute default those imports assumed.
pub fn tolerance_from_text(text: &str) -> i32 {
    INTEGER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(LEGACY_TOLERANCE_MINUTES)
}

fn or_placeholder(value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => "N/A".to_string(),
    }
}

fn time_or(value: Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => hhmm(v),
        _ => fallback.to_string(),
    }
}

/// Partial roster update. Only these fields are mutable; anything else in the
/// request body is ignored by construction.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 120, message = "Display name must be 1-120 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 120, message = "Position must be at most 120 characters"))]
    pub position: Option<String>,

    #[validate(length(max = 120, message = "Department must be at most 120 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 120, message = "Legal entity must be at most 120 characters"))]
    pub legal_entity: Option<String>,

    #[validate(custom(function = "shared::validation::validate_hhmm"))]
    pub entry_time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_hhmm"))]
    pub exit_time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tolerance_minutes"))]
    pub tolerance_minutes: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_meal_minutes"))]
    pub meal_minutes: Option<i32>,

    pub active: Option<bool>,
}

impl UpdateEmployeeRequest {
    /// True when the request carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.legal_entity.is_none()
            && self.entry_time.is_none()
            && self.exit_time.is_none()
            && self.tolerance_minutes.is_none()
            && self.meal_minutes.is_none()
            && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn raw(pin: &str) -> RawEmployeeRow {
        RawEmployeeRow {
            pin: pin.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_applies_all_defaults() {
        let schedule = raw("1011").normalize();
        assert_eq!(schedule.pin, "1011");
        assert_eq!(schedule.display_name, "PIN 1011");
        assert_eq!(schedule.department, "N/A");
        assert_eq!(schedule.position, "N/A");
        assert_eq!(schedule.legal_entity, "N/A");
        assert_eq!(schedule.scheduled_entry, "09:00");
        assert_eq!(schedule.scheduled_exit, "18:00");
        assert_eq!(schedule.tolerance_minutes, 0);
        assert!(schedule.meal_minutes.is_none());
        assert!(schedule.active);
    }

    #[test]
    fn test_normalize_keeps_populated_fields() {
        let name: String = Name().fake();
        let mut row = raw("2044");
        row.display_name = Some(name.clone());
        row.department = Some("Ventas".to_string());
        row.entry_time = Some("08:30:00".to_string());
        row.exit_time = Some("17:30".to_string());
        row.tolerance_minutes = Some(15);
        row.active = Some(false);

        let schedule = row.normalize();
        assert_eq!(schedule.display_name, name);
        assert_eq!(schedule.department, "Ventas");
        assert_eq!(schedule.scheduled_entry, "08:30");
        assert_eq!(schedule.scheduled_exit, "17:30");
        assert_eq!(schedule.tolerance_minutes, 15);
        assert!(!schedule.active);
    }

    #[test]
    fn test_normalize_blank_name_gets_placeholder() {
        let mut row = raw("7");
        row.display_name = Some("   ".to_string());
        assert_eq!(row.normalize().display_name, "PIN 7");
    }

    #[test]
    fn test_numeric_tolerance_wins_over_text() {
        let mut row = raw("1");
        row.tolerance_minutes = Some(5);
        row.tolerance_text = Some("19 min".to_string());
        assert_eq!(row.normalize().tolerance_minutes, 5);
    }

    #[test]
    fn test_tolerance_from_text() {
        assert_eq!(tolerance_from_text("19 min"), 19);
        assert_eq!(tolerance_from_text("tolerancia 15 minutos"), 15);
        assert_eq!(tolerance_from_text("0"), 0);
        assert_eq!(tolerance_from_text("sin tolerancia"), 19);
        assert_eq!(tolerance_from_text(""), 19);
    }

    #[test]
    fn test_text_tolerance_used_when_no_numeric() {
        let mut row = raw("1");
        row.tolerance_text = Some("10 min".to_string());
        assert_eq!(row.normalize().tolerance_minutes, 10);
    }

    #[test]
    fn test_schedule_label() {
        let mut row = raw("1");
        row.entry_time = Some("08:00".to_string());
        row.exit_time = Some("16:00".to_string());
        assert_eq!(row.normalize().schedule_label(), "08:00 - 16:00");
    }

    #[test]
    fn test_update_request_validation() {
        let request = UpdateEmployeeRequest {
            display_name: Some("Ana Torres".to_string()),
            entry_time: Some("08:30".to_string()),
            tolerance_minutes: Some(15),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_rejects_bad_time() {
        let request = UpdateEmployeeRequest {
            entry_time: Some("25:00".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_negative_tolerance() {
        let request = UpdateEmployeeRequest {
            tolerance_minutes: Some(-1),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdateEmployeeRequest::default().is_empty());
        let request = UpdateEmployeeRequest {
            active: Some(true),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }
}
