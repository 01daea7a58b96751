use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::store::LogStore;

/// Whether a reminder should fire for this user today.
///
/// True iff no log exists for (user, today). A log with every category
/// unchecked still counts as "showed up" and suppresses the reminder. The
/// caller is responsible for only asking about users with a registered
/// notification channel.
pub async fn should_remind<S: LogStore>(
    store: &S,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<bool> {
    Ok(store.get_log(user_id, today).await?.is_none())
}
