//! Employee roster endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{EmployeeSchedule, UpdateEmployeeRequest};
use persistence::repositories::{EmployeeRepository, EmployeeUpdate};
use shared::timeparse::hhmm;

/// Query parameters for the roster listing.
#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    /// Substring search over pin, name, department and position.
    pub q: Option<String>,
}

/// Response for the roster listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEmployeesResponse {
    pub count: usize,
    pub employees: Vec<EmployeeSchedule>,
}

/// Response wrapping a single employee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EmployeeResponse {
    pub employee: EmployeeSchedule,
}

/// Response for the department options listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DepartmentOptionsResponse {
    pub departments: Vec<String>,
}

/// Response for the position options listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PositionOptionsResponse {
    pub positions: Vec<String>,
}

/// List the roster, optionally filtered by a search term.
///
/// GET /api/v1/employees?q=<term>
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<ListEmployeesResponse>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let entities = repo.find_all(query.q.as_deref()).await?;

    let employees: Vec<EmployeeSchedule> =
        entities.into_iter().map(EmployeeSchedule::from).collect();

    Ok(Json(ListEmployeesResponse {
        count: employees.len(),
        employees,
    }))
}

/// Fetch one employee by pin.
///
/// GET /api/v1/employees/{pin}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(pin): Path<i64>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let entity = repo
        .find_by_pin(pin)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Ok(Json(EmployeeResponse {
        employee: entity.into(),
    }))
}

/// Apply a partial update to one employee.
///
/// PATCH /api/v1/employees/{pin}
///
/// Only the allow-listed fields can change; anything else in the body is
/// ignored by construction of the request type.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(pin): Path<i64>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    request.validate()?;

    if request.is_empty() {
        return Err(ApiError::Validation(
            "At least one updatable field is required".to_string(),
        ));
    }

    let update = EmployeeUpdate {
        display_name: request.display_name,
        position: request.position,
        department: request.department,
        legal_entity: request.legal_entity,
        // Times are stored normalized to HH:MM
        entry_time: request.entry_time.as_deref().map(hhmm),
        exit_time: request.exit_time.as_deref().map(hhmm),
        tolerance_minutes: request.tolerance_minutes,
        meal_minutes: request.meal_minutes,
        active: request.active,
    };

    let repo = EmployeeRepository::new(state.pool.clone());
    let entity = repo
        .update(pin, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    info!(pin = pin, "Employee updated");

    Ok(Json(EmployeeResponse {
        employee: entity.into(),
    }))
}

/// Distinct department names for filter widgets.
///
/// GET /api/v1/employees/options/departments
pub async fn get_department_options(
    State(state): State<AppState>,
) -> Result<Json<DepartmentOptionsResponse>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let departments = repo.distinct_departments().await?;
    Ok(Json(DepartmentOptionsResponse { departments }))
}

/// Distinct position names for filter widgets.
///
/// GET /api/v1/employees/options/positions
pub async fn get_position_options(
    State(state): State<AppState>,
) -> Result<Json<PositionOptionsResponse>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let positions = repo.distinct_positions().await?;
    Ok(Json(PositionOptionsResponse { positions }))
}
