use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::analytics::aggregate::{aggregate, ActivitySummary, SubjectStats};
use crate::analytics::heatmap::{build_heatmap, HeatmapEntry, DEFAULT_HEATMAP_DAYS};
use crate::analytics::streak::current_streak;
use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::handlers::parse_date;
use crate::models::daily_log::DailyLog;
use crate::store::{LogStore, PgLogStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Day shown in the editor; analytics always anchor to today.
    pub date: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct DashboardResponse {
    pub selected_date: NaiveDate,
    pub prev_date: NaiveDate,
    pub next_date: NaiveDate,
    pub day: Option<DailyLog>,
    pub streak: u32,
    pub heatmap: Vec<HeatmapEntry>,
    pub subject_stats: SubjectStats,
    pub weekly: [u8; 7],
}

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub days: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
pub struct StreakResponse {
    pub streak: u32,
}

/// Everything the dashboard needs in one round trip: the selected day's log
/// plus streak, heatmap, and aggregate analytics computed fresh from the
/// log store.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let today = Utc::now().date_naive();
    let selected_date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    let store = PgLogStore::new(state.db.clone());

    let day = store.get_log(auth_user.id, selected_date).await?;
    let streak = current_streak(&store, auth_user.id, today).await?;
    let heatmap = build_heatmap(&store, auth_user.id, today, DEFAULT_HEATMAP_DAYS).await?;
    let summary = aggregate(&store, auth_user.id, today).await?;

    Ok(Json(DashboardResponse {
        selected_date,
        prev_date: selected_date - Duration::days(1),
        next_date: selected_date + Duration::days(1),
        day,
        streak,
        heatmap,
        subject_stats: summary.subject_stats,
        weekly: summary.weekly,
    }))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<StreakResponse>> {
    let store = PgLogStore::new(state.db.clone());
    let streak = current_streak(&store, auth_user.id, Utc::now().date_naive()).await?;

    Ok(Json(StreakResponse { streak }))
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HeatmapQuery>,
) -> AppResult<Json<Vec<HeatmapEntry>>> {
    let days = query.days.unwrap_or(DEFAULT_HEATMAP_DAYS).clamp(1, 365);

    let store = PgLogStore::new(state.db.clone());
    let entries = build_heatmap(&store, auth_user.id, Utc::now().date_naive(), days).await?;

    Ok(Json(entries))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ActivitySummary>> {
    let store = PgLogStore::new(state.db.clone());
    let summary = aggregate(&store, auth_user.id, Utc::now().date_naive()).await?;

    Ok(Json(summary))
}
