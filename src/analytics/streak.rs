use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::LogStore;

/// How far back a streak scan will walk. A streak that is still unbroken at
/// this depth saturates to exactly this value.
pub const STREAK_HORIZON_DAYS: u32 = 365;

/// Count consecutive active days walking backward from `reference`.
///
/// A day is active when its log exists and has at least one category checked.
/// The scan starts at `reference` itself, so a user who has not logged today
/// gets 0 even if every prior day was active.
pub async fn current_streak<S: LogStore>(
    store: &S,
    user_id: Uuid,
    reference: NaiveDate,
) -> AppResult<u32> {
    for i in 0..STREAK_HORIZON_DAYS {
        let day = reference - Duration::days(i as i64);
        let active = store
            .get_log(user_id, day)
            .await?
            .map(|log| log.is_active())
            .unwrap_or(false);

        if !active {
            return Ok(i);
        }
    }

    Ok(STREAK_HORIZON_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::store::testing::MemoryLogStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_streak_counts_consecutive_active_days() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        store.put(user, today, [true, false, false, false]);
        store.put(user, today - Duration::days(1), [false, true, false, false]);
        store.put(user, today - Duration::days(2), [true, true, true, true]);
        // no log on day -3

        assert_eq!(current_streak(&store, user, today).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_streak_zero_when_reference_day_unlogged() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        // Active every prior day, nothing logged today.
        for i in 1..=5 {
            store.put(user, today - Duration::days(i), [true, false, false, false]);
        }

        assert_eq!(current_streak(&store, user, today).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_streak_zero_when_reference_day_all_unchecked() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        store.put(user, today, [false, false, false, false]);
        store.put(user, today - Duration::days(1), [true, false, false, false]);

        assert_eq!(current_streak(&store, user, today).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_streak_zero_on_empty_history() {
        let store = MemoryLogStore::new();
        let streak = current_streak(&store, Uuid::new_v4(), date(2026, 3, 10))
            .await
            .unwrap();
        assert_eq!(streak, 0);
    }

    #[tokio::test]
    async fn test_streak_saturates_at_horizon() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        for i in 0..(STREAK_HORIZON_DAYS as i64 + 40) {
            store.put(user, today - Duration::days(i), [false, false, true, false]);
        }

        assert_eq!(
            current_streak(&store, user, today).await.unwrap(),
            STREAK_HORIZON_DAYS
        );
    }

    #[tokio::test]
    async fn test_streak_ignores_other_users_logs() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        store.put(other, today, [true, true, true, true]);

        assert_eq!(current_streak(&store, user, today).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_streak_propagates_store_failure() {
        let mut store = MemoryLogStore::new();
        store.unavailable = true;

        let err = current_streak(&store, Uuid::new_v4(), date(2026, 3, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
