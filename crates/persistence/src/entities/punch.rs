//! Punch entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the punches table.
///
/// `timestamp_utc` is stored as TEXT: the engine treats punch timestamps as
/// lexical strings (date and time-of-day are sliced out, never converted),
/// and ISO-formatted text sorts chronologically, so range scans work as-is.
#[derive(Debug, Clone, FromRow)]
pub struct PunchEntity {
    pub id: i64,
    pub device_ip: Option<String>,
    pub pin: String,
    pub timestamp_utc: String,
    pub created_at: DateTime<Utc>,
}

impl From<PunchEntity> for domain::models::Punch {
    fn from(entity: PunchEntity) -> Self {
        Self {
            pin: entity.pin,
            timestamp: entity.timestamp_utc,
            device_ip: entity.device_ip,
        }
    }
}
