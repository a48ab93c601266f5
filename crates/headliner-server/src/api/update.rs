//! The `/update-homepage` orchestration handler.
//!
//! One inbound request drives up to three sequential upstream calls: list
//! themes, probe for the homepage asset, write the mutated asset back. Each
//! step depends on the previous result, so there is no parallelism and no
//! state survives the request.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use headliner_core::set_headline;
use headliner_shopify::ThemeApiError;

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, AppState, UpdateResponse};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct UpdateHomepageRequest {
    pub text: Option<String>,
}

/// POST /update-homepage — write a new headline into the live theme.
pub(in crate::api) async fn update_homepage(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<UpdateHomepageRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let rid = &req_id.0;

    // Validate before any outbound call.
    let text = match body.text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            return Err(ApiError::validation(
                "request body must include a non-empty 'text' field",
            ))
        }
    };

    let theme = state
        .client
        .find_main_theme()
        .await
        .map_err(map_upstream_error)?
        .ok_or_else(|| ApiError::not_found("shop has no theme with role 'main'"))?;

    let (kind, asset) = match state.client.fetch_homepage_asset(theme.id).await {
        Ok(hit) => hit,
        Err(ThemeApiError::NoHomepageAsset) => {
            return Err(ApiError::not_found(
                "theme has no recognized homepage asset",
            ))
        }
        Err(e) => return Err(map_upstream_error(e)),
    };

    // The asset value is itself a JSON-encoded document.
    let mut doc: serde_json::Value = serde_json::from_str(&asset.value).map_err(|e| {
        tracing::error!(request_id = %rid, asset = %kind, error = %e, "asset value is not valid JSON");
        ApiError::malformed_asset(&format!("asset {kind} is not valid JSON"))
    })?;

    let outcome = set_headline(kind, &mut doc, &text)
        .map_err(|e| ApiError::malformed_asset(&e.to_string()))?;

    if outcome.mutated() {
        let value = serde_json::to_string(&doc).map_err(|e| {
            tracing::error!(request_id = %rid, asset = %kind, error = %e, "failed to re-serialize asset");
            ApiError::malformed_asset("failed to re-serialize mutated asset")
        })?;
        state
            .client
            .write_asset(theme.id, kind.key(), &value)
            .await
            .map_err(map_upstream_error)?;
        tracing::info!(
            request_id = %rid,
            theme_id = theme.id,
            asset = %kind,
            outcome = ?outcome,
            "homepage headline written"
        );
    } else {
        // Recognized no-op: the document has no headline slot this rule can
        // fill. Historically reported as success, so keep that contract but
        // make the miss visible in telemetry.
        tracing::warn!(
            request_id = %rid,
            theme_id = theme.id,
            asset = %kind,
            outcome = ?outcome,
            "no headline location found; document left unchanged"
        );
    }

    Ok(Json(UpdateResponse { success: true }))
}
