use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::user::{UpdateProfileRequest, User};
use crate::AppState;

/// Current user's profile. The row is provisioned lazily on first call —
/// identity lives with the external auth service, so the first verified
/// request is the first time this API hears about the user.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<User>> {
    let name = auth_user
        .name
        .clone()
        .unwrap_or_else(|| auth_user.email.clone());

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, name)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET
            email = EXCLUDED.email,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(&auth_user.email)
    .bind(&name)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    if let Some(name) = &body.name {
        if name.is_empty() {
            return Err(AppError::Validation("Name cannot be empty".into()));
        }
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            telegram_chat_id = COALESCE($3, telegram_chat_id),
            leetcode = COALESCE($4, leetcode),
            gfg = COALESCE($5, gfg),
            linkedin = COALESCE($6, linkedin),
            github = COALESCE($7, github),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(auth_user.id)
    .bind(&body.name)
    .bind(&body.telegram_chat_id)
    .bind(&body.leetcode)
    .bind(&body.gfg)
    .bind(&body.linkedin)
    .bind(&body.github)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user))
}
