use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One user's activity record for exactly one calendar date.
/// At most one row exists per (user_id, log_date); writes go through the
/// upsert in the daily-logs handler.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub dsa: bool,
    pub aptitude: bool,
    pub dev: bool,
    pub project: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    /// Number of categories checked for the day, 0..=4.
    pub fn activity_level(&self) -> u8 {
        u8::from(self.dsa) + u8::from(self.aptitude) + u8::from(self.dev) + u8::from(self.project)
    }

    pub fn is_active(&self) -> bool {
        self.activity_level() > 0
    }
}

#[derive(Debug, Deserialize)]
pub struct UpsertDailyLogRequest {
    /// ISO date (YYYY-MM-DD); defaults to today when omitted.
    pub date: Option<String>,
    // Checkbox semantics: an unchecked category is simply absent from the form.
    #[serde(default)]
    pub dsa: bool,
    #[serde(default)]
    pub aptitude: bool,
    #[serde(default)]
    pub dev: bool,
    #[serde(default)]
    pub project: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_flags(dsa: bool, aptitude: bool, dev: bool, project: bool) -> DailyLog {
        DailyLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            log_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            dsa,
            aptitude,
            dev,
            project,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_activity_level_counts_checked_categories() {
        assert_eq!(log_with_flags(false, false, false, false).activity_level(), 0);
        assert_eq!(log_with_flags(true, false, false, false).activity_level(), 1);
        assert_eq!(log_with_flags(true, false, true, false).activity_level(), 2);
        assert_eq!(log_with_flags(true, true, true, true).activity_level(), 4);
    }

    #[test]
    fn test_all_false_log_is_inactive() {
        assert!(!log_with_flags(false, false, false, false).is_active());
        assert!(log_with_flags(false, true, false, false).is_active());
    }

    #[test]
    fn test_upsert_request_missing_flags_default_false() {
        let req: UpsertDailyLogRequest =
            serde_json::from_str(r#"{"date":"2026-03-01","dsa":true}"#).unwrap();
        assert!(req.dsa);
        assert!(!req.aptitude);
        assert!(!req.dev);
        assert!(!req.project);
        assert!(req.notes.is_none());
    }
}
