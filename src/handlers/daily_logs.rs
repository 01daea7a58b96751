use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::handlers::parse_date;
use crate::models::daily_log::{DailyLog, DailyLogQuery, UpsertDailyLogRequest};
use crate::AppState;

/// Set the day's activity record. One row per (user, date): the first save
/// creates it, later saves overwrite the flags in place.
pub async fn upsert_daily_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertDailyLogRequest>,
) -> AppResult<Json<DailyLog>> {
    let log_date = match body.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    let log = sqlx::query_as::<_, DailyLog>(
        r#"
        INSERT INTO daily_logs (id, user_id, log_date, dsa, aptitude, dev, project, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, ''))
        ON CONFLICT (user_id, log_date) DO UPDATE SET
            dsa = $4,
            aptitude = $5,
            dev = $6,
            project = $7,
            notes = COALESCE($8, daily_logs.notes),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(log_date)
    .bind(body.dsa)
    .bind(body.aptitude)
    .bind(body.dev)
    .bind(body.project)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(log))
}

pub async fn list_daily_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DailyLogQuery>,
) -> AppResult<Json<Vec<DailyLog>>> {
    let end = match query.end_date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    let start = match query.start_date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => end - chrono::Duration::days(30),
    };

    let logs = sqlx::query_as::<_, DailyLog>(
        r#"
        SELECT * FROM daily_logs
        WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(logs))
}
