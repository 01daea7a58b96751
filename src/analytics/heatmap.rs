use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::LogStore;

/// Window the dashboard renders: five calendar weeks ending today.
pub const DEFAULT_HEATMAP_DAYS: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapEntry {
    pub date: NaiveDate,
    pub level: u8,
}

/// Per-day activity intensity for a fixed window ending at `reference`.
///
/// Always returns exactly `window_days` entries in ascending date order, the
/// last one being `reference` itself. Days without a log get level 0.
pub async fn build_heatmap<S: LogStore>(
    store: &S,
    user_id: Uuid,
    reference: NaiveDate,
    window_days: usize,
) -> AppResult<Vec<HeatmapEntry>> {
    let mut entries = Vec::with_capacity(window_days);

    for i in 0..window_days {
        let date = reference - Duration::days((window_days - 1 - i) as i64);
        let level = store
            .get_log(user_id, date)
            .await?
            .map(|log| log.activity_level())
            .unwrap_or(0);

        entries.push(HeatmapEntry { date, level });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryLogStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_heatmap_window_shape() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let store = MemoryLogStore::new();

        let entries = build_heatmap(&store, user, today, DEFAULT_HEATMAP_DAYS)
            .await
            .unwrap();

        assert_eq!(entries.len(), DEFAULT_HEATMAP_DAYS);
        assert_eq!(entries.last().unwrap().date, today);
        assert_eq!(
            entries.first().unwrap().date,
            today - Duration::days(DEFAULT_HEATMAP_DAYS as i64 - 1)
        );
        // Strictly ascending, no gaps.
        for pair in entries.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
    }

    #[tokio::test]
    async fn test_heatmap_empty_history_is_all_zero() {
        let store = MemoryLogStore::new();
        let entries = build_heatmap(&store, Uuid::new_v4(), date(2026, 3, 10), 7)
            .await
            .unwrap();

        assert!(entries.iter().all(|e| e.level == 0));
    }

    #[tokio::test]
    async fn test_heatmap_levels_reflect_checked_categories() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        store.put(user, today, [true, true, false, false]);
        store.put(user, today - Duration::days(2), [true, true, true, true]);
        store.put(user, today - Duration::days(3), [false, false, false, false]);

        let entries = build_heatmap(&store, user, today, 5).await.unwrap();
        let levels: Vec<u8> = entries.iter().map(|e| e.level).collect();

        // Days -4..0: missing, all-unchecked, full, missing, two checked.
        assert_eq!(levels, vec![0, 0, 4, 0, 2]);
    }

    #[tokio::test]
    async fn test_heatmap_ignores_logs_outside_window() {
        let user = Uuid::new_v4();
        let today = date(2026, 3, 10);
        let mut store = MemoryLogStore::new();
        store.put(user, today - Duration::days(10), [true, true, true, true]);

        let entries = build_heatmap(&store, user, today, 7).await.unwrap();
        assert!(entries.iter().all(|e| e.level == 0));
    }
}
