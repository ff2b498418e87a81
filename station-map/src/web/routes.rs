//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::gbfs::FeedError;
use crate::snapshot::MapSnapshot;

use super::dto::{ErrorResponse, MapPayload};
use super::state::AppState;
use super::templates::{ErrorTemplate, MapTemplate};

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(map_page))
        .route("/health", get(health))
        .route("/api/stations", get(stations))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The station map page.
async fn map_page(State(state): State<AppState>) -> Response {
    let html = load_payload(&state).await.and_then(|payload| {
        let template = MapTemplate::new(&payload).map_err(|e| AppError::Internal {
            message: format!("Payload encoding error: {e}"),
        })?;
        template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })
    });

    match html {
        Ok(html) => Html(html).into_response(),
        Err(e) => e.into_html_response(),
    }
}

/// Classified stations as JSON.
async fn stations(State(state): State<AppState>) -> Result<Json<MapPayload>, AppError> {
    Ok(Json(load_payload(&state).await?))
}

/// Fetch both feeds, join them and build the renderer payload.
async fn load_payload(state: &AppState) -> Result<MapPayload, AppError> {
    let (information, status) = state.feeds.both().await?;
    let snapshot = MapSnapshot::build(&information, &status);

    if snapshot.rejected_records > 0 {
        warn!(
            rejected = snapshot.rejected_records,
            "feed records failed validation and are not shown"
        );
    }

    Ok(MapPayload::new(&state.map, &snapshot))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// A feed could not be fetched or decoded
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Upstream { message } | AppError::Internal { message } => message,
        }
    }

    fn log(&self) {
        error!(status = %self.status(), message = self.message(), "request failed");
    }

    /// Render as an HTML error page.
    pub fn into_html_response(self) -> Response {
        self.log();

        let title = match self {
            AppError::Upstream { .. } => "Station feeds unavailable",
            AppError::Internal { .. } => "Something went wrong",
        };
        let template = ErrorTemplate {
            title: title.to_string(),
            message: "The station map could not be built right now.".to_string(),
            details: Some(self.message().to_string()),
        };

        match template.render() {
            Ok(html) => (self.status(), Html(html)).into_response(),
            Err(e) => (self.status(), format!("Template error: {e}")).into_response(),
        }
    }
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
