use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::LogStore;

/// Lifetime count of days each category was checked.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    pub dsa: u32,
    pub aptitude: u32,
    pub dev: u32,
    pub project: u32,
}

/// Category totals plus the most recent 7 days of activity levels, indexed
/// oldest-to-newest with `reference` in the last slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub subject_stats: SubjectStats,
    pub weekly: [u8; 7],
}

/// Fold a user's full log history into category totals and a weekly vector.
///
/// Every log contributes to the category counters; only logs dated within
/// the 7 days ending at `reference` land in the weekly vector. Since
/// (user, date) is unique, no two logs compete for a slot.
pub async fn aggregate<S: LogStore>(
    store: &S,
    user_id: Uuid,
    reference: NaiveDate,
) -> AppResult<ActivitySummary> {
    let logs = store.get_all_logs(user_id).await?;

    let mut subject_stats = SubjectStats::default();
    let mut weekly = [0u8; 7];

    for log in &logs {
        if log.dsa {
            subject_stats.dsa += 1;
        }
        if log.aptitude {
            subject_stats.aptitude += 1;
        }
        if log.dev {
            subject_stats.dev += 1;
        }
        if log.project {
            subject_stats.project += 1;
        }

        let diff = (reference - log.log_date).num_days();
        if (0..7).contains(&diff) {
            weekly[(6 - diff) as usize] = log.activity_level();
        }
    }

    Ok(ActivitySummary {
        subject_stats,
        weekly,
    })
}
