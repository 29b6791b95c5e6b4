//! Punch log repository for database operations.
//!
//! The punch log is append-only: the clock devices write it, this service
//! only reads it. All range predicates are lexical string comparisons on the
//! stored timestamp.

use sqlx::PgPool;

use crate::entities::PunchEntity;

/// Hard cap on rows returned by a single range query. Callers page with the
/// keyset cursor when a month can exceed this.
pub const MAX_PUNCH_BATCH: i64 = 10_000;

/// Repository for punch-log database operations.
#[derive(Clone)]
pub struct PunchRepository {
    pool: PgPool,
}

impl PunchRepository {
    /// Creates a new PunchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find punches in the lexical range `[start, end)`, ascending by
    /// `(timestamp_utc, id)`, optionally resuming after a keyset position.
    ///
    /// `limit` is clamped to `1..=MAX_PUNCH_BATCH`.
    pub async fn find_by_range(
        &self,
        start: &str,
        end: &str,
        after: Option<(&str, i64)>,
        limit: i64,
    ) -> Result<Vec<PunchEntity>, sqlx::Error> {
        let (after_ts, after_id) = match after {
            Some((ts, id)) => (Some(ts.to_string()), Some(id)),
            None => (None, None),
        };

        sqlx::query_as::<_, PunchEntity>(
            r#"
            SELECT id, device_ip, pin, timestamp_utc, created_at
            FROM punches
            WHERE timestamp_utc >= $1
              AND timestamp_utc < $2
              AND ($3::TEXT IS NULL OR (timestamp_utc, id) > ($3, $4))
            ORDER BY timestamp_utc ASC, id ASC
            LIMIT $5
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(after_ts)
        .bind(after_id)
        .bind(limit.clamp(1, MAX_PUNCH_BATCH))
        .fetch_all(&self.pool)
        .await
    }

    /// Count punches in the lexical range `[start, end)`.
    pub async fn count_in_range(&self, start: &str, end: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM punches
            WHERE timestamp_utc >= $1 AND timestamp_utc < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }
}
