//! Employee roster repository for database operations.

use sqlx::PgPool;

use crate::entities::EmployeeEntity;

/// Hard cap on roster rows returned by a listing query.
const MAX_ROSTER_BATCH: i64 = 10_000;

/// Allow-listed partial update for one roster row. A `None` field leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub display_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub legal_entity: Option<String>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    pub tolerance_minutes: Option<i32>,
    pub meal_minutes: Option<i32>,
    pub active: Option<bool>,
}

/// Repository for employee-roster database operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find all employees, ordered by pin, optionally filtered by a substring
    /// match over pin, name, department and position.
    pub async fn find_all(&self, search: Option<&str>) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT pin, display_name, department, "position", legal_entity,
                   entry_time, exit_time, tolerance_minutes, meal_minutes,
                   active, created_at, updated_at
            FROM employees
            WHERE $1::TEXT IS NULL
               OR pin::TEXT ILIKE $1
               OR display_name ILIKE $1
               OR department ILIKE $1
               OR "position" ILIKE $1
            ORDER BY pin ASC
            LIMIT $2
            "#,
        )
        .bind(search)
        .bind(MAX_ROSTER_BATCH)
        .fetch_all(&self.pool)
        .await
    }

    /// Find an employee by pin.
    pub async fn find_by_pin(&self, pin: i64) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT pin, display_name, department, "position", legal_entity,
                   entry_time, exit_time, tolerance_minutes, meal_minutes,
                   active, created_at, updated_at
            FROM employees
            WHERE pin = $1
            "#,
        )
        .bind(pin)
        .fetch_optional(&self.pool)
        .await
    }

    /// Apply a partial update to one employee. Only the allow-listed columns
    /// can change; absent fields keep their stored values.
    ///
    /// Returns the updated row, or `None` when the pin does not exist.
    pub async fn update(
        &self,
        pin: i64,
        update: EmployeeUpdate,
    ) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeEntity>(
            r#"
            UPDATE employees SET
                display_name = COALESCE($2, display_name),
                "position" = COALESCE($3, "position"),
                department = COALESCE($4, department),
                legal_entity = COALESCE($5, legal_entity),
                entry_time = COALESCE($6, entry_time),
                exit_time = COALESCE($7, exit_time),
                tolerance_minutes = COALESCE($8, tolerance_minutes),
                meal_minutes = COALESCE($9, meal_minutes),
                active = COALESCE($10, active),
                updated_at = NOW()
            WHERE pin = $1
            RETURNING pin, display_name, department, "position", legal_entity,
                      entry_time, exit_time, tolerance_minutes, meal_minutes,
                      active, created_at, updated_at
            "#,
        )
        .bind(pin)
        .bind(update.display_name)
        .bind(update.position)
        .bind(update.department)
        .bind(update.legal_entity)
        .bind(update.entry_time)
        .bind(update.exit_time)
        .bind(update.tolerance_minutes)
        .bind(update.meal_minutes)
        .bind(update.active)
        .fetch_optional(&self.pool)
        .await
    }

    /// Distinct non-empty department names, sorted.
    pub async fn distinct_departments(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT department
            FROM employees
            WHERE department IS NOT NULL AND department <> ''
            ORDER BY department ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Distinct non-empty position names, sorted.
    pub async fn distinct_positions(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT "position"
            FROM employees
            WHERE "position" IS NOT NULL AND "position" <> ''
            ORDER BY "position" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
