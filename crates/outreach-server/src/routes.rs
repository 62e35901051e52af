//! Route handlers.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use outreach_browser::PageFactory;
use outreach_core::{AppConfig, SubmissionRequest, SubmitResponse};
use outreach_form::run_submission;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Shared server state.
pub struct AppState {
    /// Browser capability; one exclusive page per request.
    pub factory: Arc<dyn PageFactory>,
    /// Process configuration, fixed at startup.
    pub config: AppConfig,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    Router::new()
        .route("/", get(status_handler))
        .route("/submit", post(submit_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn status_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmissionRequest>,
) -> (StatusCode, Json<SubmitResponse>) {
    if !request.has_url() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SubmitResponse::rejected("missing url")),
        );
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("submit", %request_id, url = %request.url);

    async move {
        let driver = match state.factory.open_page().await {
            Ok(driver) => driver,
            Err(error) => {
                tracing::error!(%error, "failed to open page");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SubmitResponse::rejected(error.to_string())),
                );
            }
        };

        let result = run_submission(driver.as_ref(), &request).await;
        // Release the page on every exit path.
        driver.close().await;

        match result {
            Ok(verdict) => {
                tracing::info!(
                    outcome = ?verdict.outcome,
                    clicked = verdict.clicked,
                    "submission finished"
                );
                (StatusCode::OK, Json(SubmitResponse::from(verdict)))
            }
            Err(error) => {
                tracing::error!(%error, "submission failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SubmitResponse::rejected(error.to_string())),
                )
            }
        }
    }
    .instrument(span)
    .await
}
