use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::daily_log::DailyLog;

/// Read-side contract the analytics engine consumes. Absence of a log for a
/// date is a valid state (`Ok(None)`), never an error; a store that cannot
/// answer surfaces `AppError::StoreUnavailable` and the caller decides what
/// to do about it.
#[allow(async_fn_in_trait)]
pub trait LogStore {
    async fn get_log(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<DailyLog>>;

    /// Full unfiltered history for a user, in no particular order.
    async fn get_all_logs(&self, user_id: Uuid) -> AppResult<Vec<DailyLog>>;
}

#[derive(Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LogStore for PgLogStore {
    async fn get_log(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<DailyLog>> {
        let log = sqlx::query_as::<_, DailyLog>(
            "SELECT * FROM daily_logs WHERE user_id = $1 AND log_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    async fn get_all_logs(&self, user_id: Uuid) -> AppResult<Vec<DailyLog>> {
        let logs = sqlx::query_as::<_, DailyLog>("SELECT * FROM daily_logs WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(logs)
    }
}
