use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Telegram chat id, set once the user links the bot. Reminders only go
    /// to users with a registered channel.
    pub telegram_chat_id: Option<String>,
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}
