mod update;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use headliner_shopify::{ThemeApiError, ThemeClient};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ThemeClient>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
}

/// Error payload fixed by the external interface: `{"success": false,
/// "error": …}` with the status carrying the taxonomy.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn malformed_asset(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Maps client errors that reach the handler to the 502 family. Expected
/// absences (no main theme, no homepage asset) are handled before this.
pub(super) fn map_upstream_error(error: ThemeApiError) -> ApiError {
    tracing::error!(error = %error, "upstream theme API call failed");
    ApiError::upstream(error.to_string())
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/update-homepage", post(update::update_homepage))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn liveness() -> &'static str {
    "headline agent active"
}
