//! Derived attendance endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_report_generated;
use crate::services::report::{apply_filters, month_records, ReportFilters};
use domain::models::{
    AttendanceStats, ChronicAlert, DepartmentRollup, DerivedDayRecord, ScheduleRollup,
};
use domain::services::aggregation::{
    chronic_alerts, department_rollups, schedule_rollups, summarize,
};
use shared::timeparse::current_month;
use shared::validation::validate_day_key;

/// Query parameters for the attendance report.
#[derive(Debug, Deserialize)]
pub struct GetReportQuery {
    /// Calendar month, `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
    /// Optional single day, `YYYY-MM-DD`.
    pub day: Option<String>,
    /// Narrow to one employee.
    pub pin: Option<String>,
    /// Narrow to one department.
    pub department: Option<String>,
    /// Narrow to one `"HH:MM - HH:MM"` schedule.
    pub schedule: Option<String>,
}

/// Attendance report response: derived day records plus their headline counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GetReportResponse {
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    pub stats: AttendanceStats,
    pub records: Vec<DerivedDayRecord>,
}

/// Query parameters for the month summary.
#[derive(Debug, Deserialize)]
pub struct GetSummaryQuery {
    /// Calendar month, `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
}

/// Month dashboard response: counts, rollups and chronic-lateness alerts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GetSummaryResponse {
    pub month: String,
    pub stats: AttendanceStats,
    pub departments: Vec<DepartmentRollup>,
    pub schedules: Vec<ScheduleRollup>,
    pub chronic_alerts: Vec<ChronicAlert>,
}

/// Derived attendance records for a month, optionally narrowed.
///
/// GET /api/v1/attendance/report?month=&day=&pin=&department=&schedule=
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<GetReportQuery>,
) -> Result<Json<GetReportResponse>, ApiError> {
    let month = query.month.unwrap_or_else(current_month);

    if let Some(day) = &query.day {
        validate_day_key(day)
            .map_err(|_| ApiError::Validation("Day must be YYYY-MM-DD".to_string()))?;
    }

    let mut records = month_records(&state.pool, &month).await?;
    apply_filters(
        &mut records,
        &ReportFilters {
            day: query.day.clone(),
            pin: query.pin,
            department: query.department,
            schedule: query.schedule,
        },
    );

    let stats = summarize(&records);
    record_report_generated(records.len());

    info!(
        month = %month,
        total = stats.total,
        late = stats.late,
        "Attendance report generated"
    );

    Ok(Json(GetReportResponse {
        month,
        day: query.day,
        stats,
        records,
    }))
}

/// Month dashboard: counts, per-department and per-schedule rollups, and
/// chronic-lateness alerts.
///
/// GET /api/v1/attendance/summary?month=
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<GetSummaryQuery>,
) -> Result<Json<GetSummaryResponse>, ApiError> {
    let month = query.month.unwrap_or_else(current_month);

    let records = month_records(&state.pool, &month).await?;

    let stats = summarize(&records);
    let departments = department_rollups(&records);
    let schedules = schedule_rollups(&records);
    let chronic = chronic_alerts(&records);

    info!(
        month = %month,
        total = stats.total,
        chronic = chronic.len(),
        "Attendance summary generated"
    );

    Ok(Json(GetSummaryResponse {
        month,
        stats,
        departments,
        schedules,
        chronic_alerts: chronic,
    }))
}
