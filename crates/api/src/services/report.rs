//! Attendance report assembly.
//!
//! Bridges the repositories and the pure derivation engine: fetch a month's
//! punches and the roster snapshot, derive day records, apply the caller's
//! filters. All derived state is recomputed per query; nothing is cached.

use domain::models::{DerivedDayRecord, EmployeeSchedule, Punch};
use domain::services::aggregation::derive_for_roster;
use persistence::repositories::{EmployeeRepository, PunchRepository, MAX_PUNCH_BATCH};
use sqlx::PgPool;
use tracing::debug;

use crate::error::ApiError;

/// Optional narrowing applied to a month's derived records.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    /// Exact calendar day, `YYYY-MM-DD`.
    pub day: Option<String>,
    pub pin: Option<String>,
    pub department: Option<String>,
    /// `"HH:MM - HH:MM"` schedule label.
    pub schedule: Option<String>,
}

/// Derives day records for one calendar month.
///
/// Punches and roster are fetched concurrently and independently; if either
/// fetch fails the whole query fails with no partial result. Zero punches is
/// a valid, empty report.
pub async fn month_records(
    pool: &PgPool,
    month: &str,
) -> Result<Vec<DerivedDayRecord>, ApiError> {
    let (start, end) = shared::timeparse::month_bounds(month)
        .ok_or_else(|| ApiError::Validation("Month must be YYYY-MM".to_string()))?;

    let punch_repo = PunchRepository::new(pool.clone());
    let employee_repo = EmployeeRepository::new(pool.clone());

    let (punches, roster) = tokio::try_join!(
        fetch_month_punches(&punch_repo, &start, &end),
        fetch_roster(&employee_repo),
    )?;

    debug!(
        month = month,
        punches = punches.len(),
        roster = roster.len(),
        "Deriving attendance records"
    );

    let mut records = derive_for_roster(&punches, &roster);
    records.retain(|r| r.in_month(month));
    Ok(records)
}

/// Applies the optional report filters as pure predicates.
pub fn apply_filters(records: &mut Vec<DerivedDayRecord>, filters: &ReportFilters) {
    if let Some(day) = &filters.day {
        records.retain(|r| r.on_day(day));
    }
    if let Some(pin) = &filters.pin {
        records.retain(|r| r.for_pin(pin));
    }
    if let Some(department) = &filters.department {
        records.retain(|r| r.in_department(department));
    }
    if let Some(schedule) = &filters.schedule {
        records.retain(|r| {
            format!("{} - {}", r.scheduled_entry, r.scheduled_exit) == *schedule
        });
    }
}

/// Fetches every punch in the range, following the keyset cursor past the
/// per-query cap.
async fn fetch_month_punches(
    repo: &PunchRepository,
    start: &str,
    end: &str,
) -> Result<Vec<Punch>, ApiError> {
    let mut punches = Vec::new();
    let mut after: Option<(String, i64)> = None;
    loop {
        let page = repo
            .find_by_range(
                start,
                end,
                after.as_ref().map(|(ts, id)| (ts.as_str(), *id)),
                MAX_PUNCH_BATCH,
            )
            .await?;
        let full_page = page.len() as i64 == MAX_PUNCH_BATCH;
        after = page.last().map(|e| (e.timestamp_utc.clone(), e.id));
        punches.extend(page.into_iter().map(Punch::from));
        if !full_page {
            break;
        }
    }
    Ok(punches)
}

/// Fetches the full roster snapshot, normalized into schedules.
async fn fetch_roster(repo: &EmployeeRepository) -> Result<Vec<EmployeeSchedule>, ApiError> {
    let entities = repo.find_all(None).await?;
    Ok(entities.into_iter().map(EmployeeSchedule::from).collect())
}
