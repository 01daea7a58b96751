use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub hours: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub hours: Option<f64>,
}

/// Subject with its sections and topics nested, as the dashboard renders it.
#[derive(Debug, Serialize)]
pub struct SubjectTree {
    #[serde(flatten)]
    pub subject: Subject,
    pub sections: Vec<SectionTree>,
}

#[derive(Debug, Serialize)]
pub struct SectionTree {
    #[serde(flatten)]
    pub section: Section,
    pub topics: Vec<Topic>,
}
