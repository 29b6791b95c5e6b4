//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the employees table.
///
/// Schedule columns are nullable; normalization into a usable
/// [`domain::models::EmployeeSchedule`] (defaults, placeholders) happens in
/// the domain layer, never here.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
    pub pin: i64,
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub legal_entity: Option<String>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub tolerance_minutes: Option<i32>,
    pub meal_minutes: Option<i32>,
    pub active: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeEntity> for domain::models::RawEmployeeRow {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            pin: entity.pin.to_string(),
            display_name: entity.display_name,
            department: entity.department,
            position: entity.position,
            legal_entity: entity.legal_entity,
            entry_time: entity.entry_time,
            exit_time: entity.exit_time,
            tolerance_minutes: entity.tolerance_minutes,
            tolerance_text: None,
            meal_minutes: entity.meal_minutes,
            active: entity.active,
        }
    }
}

impl From<EmployeeEntity> for domain::models::EmployeeSchedule {
    fn from(entity: EmployeeEntity) -> Self {
        domain::models::RawEmployeeRow::from(entity).normalize()
    }
}
