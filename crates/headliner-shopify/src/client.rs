//! HTTP client for the Shopify Admin theme/asset endpoints.
//!
//! Wraps `reqwest` with the access-token header, bounded timeouts, and the
//! probe-miss semantics the fallback logic needs: a non-success status on a
//! single-asset read is an expected `None`, not an error.

use std::time::Duration;

use reqwest::{Client, Url};

use headliner_core::AssetKind;

use crate::error::ThemeApiError;
use crate::types::{Asset, AssetEnvelope, AssetPayload, AssetResponse, Theme, ThemeRole, ThemesResponse};

const API_VERSION: &str = "2024-01";
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for a single shop's Admin theme API.
///
/// Holds the HTTP client, the shop's base URL, and the access token. Use
/// [`ThemeClient::new`] for production or [`ThemeClient::with_base_url`] to
/// point at a mock server in tests. TLS verification is always on.
pub struct ThemeClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl ThemeClient {
    /// Creates a client for `https://{shop_domain}/admin/api/2024-01/`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ThemeApiError::Config`] if `shop_domain`
    /// does not form a valid URL.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, ThemeApiError> {
        let base = format!("https://{shop_domain}/admin/api/{API_VERSION}/");
        Self::with_base_url(&base, access_token, timeout_secs)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ThemeApiError::Config`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, ThemeApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("headliner/0.1 (storefront-copy)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ThemeApiError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
        })
    }

    /// Lists every theme installed on the shop.
    ///
    /// # Errors
    ///
    /// - [`ThemeApiError::Http`] on transport failure.
    /// - [`ThemeApiError::UpstreamUnavailable`] on a non-2xx status.
    /// - [`ThemeApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_themes(&self) -> Result<Vec<Theme>, ThemeApiError> {
        let url = self.endpoint("themes.json")?;
        let response = self.client.get(url.clone()).headers(self.auth_header()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ThemeApiError::UpstreamUnavailable {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: ThemesResponse =
            serde_json::from_str(&body).map_err(|e| ThemeApiError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(parsed.themes)
    }

    /// Finds the theme with role `main` — the live storefront.
    ///
    /// Returns `Ok(None)` when no theme qualifies; that is an expected,
    /// user-facing condition rather than an error. The list is refetched on
    /// every call since the shop may change its active theme at any time.
    ///
    /// # Errors
    ///
    /// Same as [`ThemeClient::list_themes`].
    pub async fn find_main_theme(&self) -> Result<Option<Theme>, ThemeApiError> {
        let themes = self.list_themes().await?;
        Ok(themes.into_iter().find(|t| t.role == ThemeRole::Main))
    }

    /// Fetches a single asset by key from a theme.
    ///
    /// Returns `Ok(None)` on any non-success status — expected while probing
    /// for the homepage asset. Transport failures still escalate.
    ///
    /// # Errors
    ///
    /// - [`ThemeApiError::Http`] on transport failure.
    /// - [`ThemeApiError::Deserialize`] if a success response does not match
    ///   the expected shape.
    pub async fn fetch_asset(
        &self,
        theme_id: i64,
        key: &str,
    ) -> Result<Option<Asset>, ThemeApiError> {
        let mut url = self.endpoint(&format!("themes/{theme_id}/assets.json"))?;
        url.query_pairs_mut().append_pair("asset[key]", key);

        let response = self.client.get(url.clone()).headers(self.auth_header()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%key, status = status.as_u16(), "asset probe miss");
            return Ok(None);
        }
        let body = response.text().await?;
        let parsed: AssetResponse =
            serde_json::from_str(&body).map_err(|e| ThemeApiError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(Some(parsed.asset))
    }

    /// Probes the recognized homepage asset keys in their fixed fallback
    /// order and returns the first hit together with its kind. Probing stops
    /// at the first success.
    ///
    /// # Errors
    ///
    /// - [`ThemeApiError::NoHomepageAsset`] if all three keys are absent.
    /// - Any error from [`ThemeClient::fetch_asset`].
    pub async fn fetch_homepage_asset(
        &self,
        theme_id: i64,
    ) -> Result<(AssetKind, Asset), ThemeApiError> {
        for kind in AssetKind::PROBE_ORDER {
            if let Some(asset) = self.fetch_asset(theme_id, kind.key()).await? {
                return Ok((kind, asset));
            }
        }
        Err(ThemeApiError::NoHomepageAsset)
    }

    /// Writes an asset value back to a theme. Not retried.
    ///
    /// # Errors
    ///
    /// - [`ThemeApiError::Http`] on transport failure.
    /// - [`ThemeApiError::WriteFailed`] on a non-2xx status, carrying the
    ///   upstream status and body.
    pub async fn write_asset(
        &self,
        theme_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), ThemeApiError> {
        let url = self.endpoint(&format!("themes/{theme_id}/assets.json"))?;
        let envelope = AssetEnvelope {
            asset: AssetPayload { key, value },
        };

        let response = self
            .client
            .put(url)
            .headers(self.auth_header())
            .json(&envelope)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(ThemeApiError::WriteFailed {
            status: status.as_u16(),
            body,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ThemeApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ThemeApiError::Config(format!("invalid endpoint '{path}': {e}")))
    }

    fn auth_header(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(value) = reqwest::header::HeaderValue::from_str(&self.access_token) {
            headers.insert(ACCESS_TOKEN_HEADER, value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ThemeClient {
        ThemeClient::with_base_url(base_url, "test-token", 8)
            .expect("client construction should not fail")
    }

    #[test]
    fn new_builds_versioned_admin_base_url() {
        let client = ThemeClient::new("example.myshopify.com", "test-token", 8)
            .expect("client construction should not fail");
        assert_eq!(
            client.base_url.as_str(),
            "https://example.myshopify.com/admin/api/2024-01/"
        );
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let client = test_client("https://example.myshopify.com/admin/api/2024-01");
        let url = client.endpoint("themes/42/assets.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.myshopify.com/admin/api/2024-01/themes/42/assets.json"
        );
    }

    #[test]
    fn asset_key_query_parameter_is_percent_encoded() {
        let client = test_client("https://example.myshopify.com/admin/api/2024-01");
        let mut url = client.endpoint("themes/42/assets.json").unwrap();
        url.query_pairs_mut()
            .append_pair("asset[key]", "config/settings_data.json");
        assert!(
            url.as_str()
                .contains("asset%5Bkey%5D=config%2Fsettings_data.json"),
            "asset key should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let result = ThemeClient::with_base_url("not a url", "test-token", 8);
        assert!(matches!(result, Err(ThemeApiError::Config(_))));
    }
}
