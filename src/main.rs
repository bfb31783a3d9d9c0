use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderName};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use caredesk::config::AppConfig;
use caredesk::db;
use caredesk::handlers;
use caredesk::services::assistant::{IntentClassifier, ResponseGenerator};
use caredesk::services::directory::SqliteDirectory;
use caredesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let db = Arc::new(Mutex::new(conn));

    let state = Arc::new(AppState {
        db: Arc::clone(&db),
        config: config.clone(),
        classifier: IntentClassifier::new(),
        responder: ResponseGenerator::new(),
        directory: Box::new(SqliteDirectory::new(db)),
    });

    // The web portal is served from another origin, so the API answers
    // preflights for the headers browser clients send along.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/doctors", get(handlers::doctors::list_doctors))
        .route("/api/doctors/:id", get(handlers::doctors::get_doctor))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id/cancel",
            post(handlers::appointments::cancel_appointment),
        )
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route(
            "/api/admin/appointments",
            get(handlers::admin::get_appointments),
        )
        .route(
            "/api/admin/appointments/:id/cancel",
            post(handlers::admin::cancel_appointment),
        )
        .route(
            "/api/admin/conversations",
            get(handlers::admin::get_conversations),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
