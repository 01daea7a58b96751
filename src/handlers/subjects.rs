use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::subject::{
    CreateSectionRequest, CreateSubjectRequest, CreateTopicRequest, Section, SectionTree, Subject,
    SubjectTree, Topic, UpdateTopicRequest,
};
use crate::AppState;

/// The user's full study plan: subjects with their sections and topics.
pub async fn list_subjects(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<SubjectTree>>> {
    let subjects = sqlx::query_as::<_, Subject>(
        "SELECT * FROM subjects WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    let sections = sqlx::query_as::<_, Section>(
        r#"
        SELECT s.* FROM sections s
        JOIN subjects sub ON sub.id = s.subject_id
        WHERE sub.user_id = $1
        ORDER BY s.created_at ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    let topics = sqlx::query_as::<_, Topic>(
        r#"
        SELECT t.* FROM topics t
        JOIN sections s ON s.id = t.section_id
        JOIN subjects sub ON sub.id = s.subject_id
        WHERE sub.user_id = $1
        ORDER BY t.created_at ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    let tree = subjects
        .into_iter()
        .map(|subject| {
            let sections = sections
                .iter()
                .filter(|s| s.subject_id == subject.id)
                .map(|section| SectionTree {
                    section: section.clone(),
                    topics: topics
                        .iter()
                        .filter(|t| t.section_id == section.id)
                        .cloned()
                        .collect(),
                })
                .collect();
            SubjectTree { subject, sections }
        })
        .collect();

    Ok(Json(tree))
}

pub async fn create_subject(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateSubjectRequest>,
) -> AppResult<Json<Subject>> {
    if body.name.is_empty() {
        return Err(AppError::Validation("Subject name is required".into()));
    }

    let subject = sqlx::query_as::<_, Subject>(
        r#"
        INSERT INTO subjects (id, user_id, name)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&body.name)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(subject))
}

pub async fn create_section(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(subject_id): Path<Uuid>,
    Json(body): Json<CreateSectionRequest>,
) -> AppResult<Json<Section>> {
    if body.title.is_empty() {
        return Err(AppError::Validation("Section title is required".into()));
    }

    // Verify subject ownership
    let _subject = sqlx::query_as::<_, Subject>(
        "SELECT * FROM subjects WHERE id = $1 AND user_id = $2",
    )
    .bind(subject_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Subject not found".into()))?;

    let section = sqlx::query_as::<_, Section>(
        r#"
        INSERT INTO sections (id, subject_id, title)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(subject_id)
    .bind(&body.title)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(section))
}

pub async fn create_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<CreateTopicRequest>,
) -> AppResult<Json<Topic>> {
    if body.title.is_empty() {
        return Err(AppError::Validation("Topic title is required".into()));
    }

    // Verify ownership through the subject
    let _section = sqlx::query_as::<_, Section>(
        r#"
        SELECT s.* FROM sections s
        JOIN subjects sub ON sub.id = s.subject_id
        WHERE s.id = $1 AND sub.user_id = $2
        "#,
    )
    .bind(section_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Section not found".into()))?;

    let topic = sqlx::query_as::<_, Topic>(
        r#"
        INSERT INTO topics (id, section_id, title)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(section_id)
    .bind(&body.title)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(topic))
}

pub async fn update_topic(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(topic_id): Path<Uuid>,
    Json(body): Json<UpdateTopicRequest>,
) -> AppResult<Json<Topic>> {
    if let Some(hours) = body.hours {
        if hours < 0.0 {
            return Err(AppError::Validation("Hours cannot be negative".into()));
        }
    }

    let topic = sqlx::query_as::<_, Topic>(
        r#"
        UPDATE topics t SET
            title = COALESCE($3, t.title),
            completed = COALESCE($4, t.completed),
            hours = COALESCE($5, t.hours)
        FROM sections s
        JOIN subjects sub ON sub.id = s.subject_id
        WHERE t.id = $1 AND s.id = t.section_id AND sub.user_id = $2
        RETURNING t.*
        "#,
    )
    .bind(topic_id)
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(body.completed)
    .bind(body.hours)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Topic not found".into()))?;

    Ok(Json(topic))
}
