//! Raw punch log endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Punch;
use persistence::repositories::{PunchRepository, MAX_PUNCH_BATCH};
use shared::pagination::{decode_cursor, encode_cursor};
use shared::timeparse::{current_month, month_bounds, next_day};
use shared::validation::{validate_day_key, validate_month_key};

/// Query parameters for the punch log listing.
#[derive(Debug, Deserialize)]
pub struct GetPunchesQuery {
    /// Calendar month, `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
    /// Optional single day, `YYYY-MM-DD`; overrides `month`.
    pub day: Option<String>,
    /// Continuation cursor from a previous page.
    pub cursor: Option<String>,
    /// Page size; capped at 10,000 rows.
    pub limit: Option<i64>,
}

/// Response for the punch log listing.
///
/// This is the raw view: every stored punch in range is returned, including
/// ones whose pin is not on the roster.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GetPunchesResponse {
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    pub count: usize,
    pub punches: Vec<Punch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// List raw punches for a month or a single day.
///
/// GET /api/v1/punches?month=YYYY-MM&day=YYYY-MM-DD&cursor=&limit=
pub async fn get_punches(
    State(state): State<AppState>,
    Query(query): Query<GetPunchesQuery>,
) -> Result<Json<GetPunchesResponse>, ApiError> {
    let month = query.month.unwrap_or_else(current_month);
    validate_month_key(&month)
        .map_err(|_| ApiError::Validation("Month must be YYYY-MM".to_string()))?;

    // A day filter narrows the lexical range to [day, day+1)
    let (start, end) = match &query.day {
        Some(day) => {
            validate_day_key(day)
                .map_err(|_| ApiError::Validation("Day must be YYYY-MM-DD".to_string()))?;
            let end = next_day(day)
                .ok_or_else(|| ApiError::Validation("Day is not a valid date".to_string()))?;
            (day.clone(), end)
        }
        None => month_bounds(&month)
            .ok_or_else(|| ApiError::Validation("Month must be YYYY-MM".to_string()))?,
    };

    let after = match &query.cursor {
        Some(cursor) => Some(
            decode_cursor(cursor)
                .map_err(|e| ApiError::Validation(format!("Invalid cursor: {e}")))?,
        ),
        None => None,
    };

    let limit = query
        .limit
        .unwrap_or(state.config.limits.punch_page_size)
        .clamp(1, MAX_PUNCH_BATCH);

    let repo = PunchRepository::new(state.pool.clone());
    let entities = repo
        .find_by_range(
            &start,
            &end,
            after.as_ref().map(|(ts, id)| (ts.as_str(), *id)),
            limit,
        )
        .await?;

    let next_cursor = if entities.len() as i64 == limit {
        entities
            .last()
            .map(|e| encode_cursor(&e.timestamp_utc, e.id))
    } else {
        None
    };

    let punches: Vec<Punch> = entities.into_iter().map(Punch::from).collect();

    info!(
        month = %month,
        day = query.day.as_deref().unwrap_or(""),
        count = punches.len(),
        "Fetched punch log"
    );

    Ok(Json(GetPunchesResponse {
        month,
        day: query.day,
        count: punches.len(),
        punches,
        next_cursor,
    }))
}
