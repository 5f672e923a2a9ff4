use std::path::Path;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    checker::Checker,
    error::CheckError,
    passwords,
    types::{CheckRequest, GenerateRequest, GenerateResponse, StatusMessage},
};

#[derive(Clone)]
pub struct AppState {
    checker: Checker,
}

impl AppState {
    pub fn new(checker: Checker) -> Self {
        Self { checker }
    }
}

/// Build the HTTP router. Static UI files are served as fallback when `ui_dir` is set.
pub fn router(state: AppState, ui_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/start_check", post(start_check))
        .route("/progress", get(progress))
        .route("/stop_check", post(stop_check))
        .route("/generate_passwords", post(generate_passwords))
        .route("/healthz", get(healthz))
        .with_state(state);

    let app = match ui_dir {
        Some(dir) => {
            api.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => api,
    };
    app.layer(TraceLayer::new_for_http())
}

pub async fn spawn_server(bind: &str, state: AppState, ui_dir: Option<&Path>) -> Result<()> {
    let app = router(state, ui_dir);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, "serving breach checker on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn start_check(
    State(app): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CheckError> {
    let Json(req) = payload.map_err(invalid_body)?;
    // worker is fire-and-forget; progress is observed through /progress
    let _handle = app
        .checker
        .start(
            req.email.as_deref(),
            req.password.as_deref(),
            req.check_without_password.unwrap_or(false),
        )
        .await?;
    Ok((StatusCode::ACCEPTED, Json(StatusMessage::new("Scan initiated"))))
}

async fn progress(State(app): State<AppState>) -> impl IntoResponse {
    Json(app.checker.coordinator.snapshot().await)
}

async fn stop_check(State(app): State<AppState>) -> impl IntoResponse {
    app.checker.coordinator.stop().await;
    Json(StatusMessage::new("Check stopped"))
}

async fn generate_passwords(
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CheckError> {
    let Json(req) = payload.map_err(invalid_body)?;
    let length = req.length.unwrap_or(passwords::DEFAULT_LENGTH);
    let count = req.count.unwrap_or(passwords::DEFAULT_COUNT);
    if !(1..=passwords::MAX_LENGTH).contains(&length) {
        return Err(CheckError::Validation(format!(
            "length must be between 1 and {}",
            passwords::MAX_LENGTH
        )));
    }
    if !(1..=passwords::MAX_COUNT).contains(&count) {
        return Err(CheckError::Validation(format!(
            "count must be between 1 and {}",
            passwords::MAX_COUNT
        )));
    }
    Ok(Json(GenerateResponse {
        passwords: passwords::generate(length, count),
    }))
}

/// Malformed or mistyped JSON gets the same `{"status": ...}` 400 as other validation errors.
fn invalid_body(rejection: JsonRejection) -> CheckError {
    CheckError::Validation(rejection.body_text())
}

async fn healthz(State(app): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "wordlist_entries": app.checker.wordlist.len(),
    }))
}
