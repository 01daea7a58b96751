use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod analytics;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod notify;
mod services;
mod store;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studyos_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    // Daily reminder sweep; skipped entirely when no bot token is configured.
    if config.telegram_bot_token.is_empty() {
        tracing::warn!("TELEGRAM_BOT_TOKEN not set, reminder worker disabled");
    } else {
        let notifier = notify::TelegramNotifier::new(config.telegram_bot_token.clone())
            .expect("Failed to build Telegram notifier");
        services::reminder::spawn_reminder_worker(
            state.db.clone(),
            notifier,
            config.reminder_hour_utc,
        );
    }

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::users::me))
        .route("/api/profile", put(handlers::users::update_profile))
        // Daily logs
        .route("/api/daily-logs", post(handlers::daily_logs::upsert_daily_log))
        .route("/api/daily-logs", get(handlers::daily_logs::list_daily_logs))
        // Dashboard & analytics
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/streak", get(handlers::dashboard::get_streak))
        .route("/api/heatmap", get(handlers::dashboard::get_heatmap))
        .route("/api/analytics", get(handlers::dashboard::get_analytics))
        // Study plan
        .route("/api/subjects", get(handlers::subjects::list_subjects))
        .route("/api/subjects", post(handlers::subjects::create_subject))
        .route(
            "/api/subjects/:id/sections",
            post(handlers::subjects::create_section),
        )
        .route(
            "/api/sections/:id/topics",
            post(handlers::subjects::create_topic),
        )
        .route("/api/topics/:id", put(handlers::subjects::update_topic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let frontend_origin = config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .expect("FRONTEND_URL must be a valid origin");
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
