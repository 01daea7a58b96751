use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::analytics::reminder::should_remind;
use crate::error::AppResult;
use crate::notify::{Notifier, TelegramNotifier};
use crate::store::PgLogStore;

const REMINDER_TEXT: &str = "🔥 StudyOS Reminder\nAaj ka tracker fill nahi kiya bhai 😤";

// ── Reminder Worker ──────────────────────────────────────────────────────────

/// Fires once a day at `hour_utc`: every user with a registered Telegram chat
/// who has not logged today gets a nudge.
pub fn spawn_reminder_worker(db: PgPool, notifier: TelegramNotifier, hour_utc: u32) {
    tokio::spawn(async move {
        loop {
            let wait = duration_until_next(Utc::now(), hour_utc);
            tokio::time::sleep(wait).await;

            match run_reminder_tick(&db, &notifier).await {
                Ok(sent) => {
                    tracing::info!(sent, "Reminder sweep complete");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Reminder sweep failed");
                }
            }
        }
    });
}

/// One sweep over all users with a notification channel. Returns how many
/// reminders went out. Send failures are logged per user and do not stop the
/// sweep; a store failure aborts it (the next tick starts fresh).
async fn run_reminder_tick<N: Notifier>(db: &PgPool, notifier: &N) -> AppResult<u64> {
    let recipients = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, telegram_chat_id FROM users WHERE telegram_chat_id IS NOT NULL",
    )
    .fetch_all(db)
    .await?;

    let store = PgLogStore::new(db.clone());
    let today = Utc::now().date_naive();
    let mut sent = 0u64;

    for (user_id, chat_id) in recipients {
        if !should_remind(&store, user_id, today).await? {
            continue;
        }

        match notifier.notify(&chat_id, REMINDER_TEXT).await {
            Ok(()) => sent += 1,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Reminder send failed");
            }
        }
    }

    Ok(sent)
}

/// Time until the next occurrence of `hour_utc`:00:00, strictly in the
/// future. An in-range hour always produces a valid time of day.
fn duration_until_next(now: DateTime<Utc>, hour_utc: u32) -> std::time::Duration {
    let today_fire = now
        .date_naive()
        .and_hms_opt(hour_utc.min(23), 0, 0)
        .expect("in-range reminder hour")
        .and_utc();

    let next = if today_fire > now {
        today_fire
    } else {
        today_fire + Duration::days(1)
    };

    (next - now)
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60))
}
