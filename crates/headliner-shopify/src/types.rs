//! Shopify Admin API wire types.
//!
//! Themes come back under a `{"themes": [...]}` envelope and single assets
//! under `{"asset": {...}}`. An asset's `value` is itself a JSON-encoded
//! string, so documents are double-decoded on read and double-encoded on
//! write.

use serde::{Deserialize, Serialize};

/// Envelope for `GET themes.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ThemesResponse {
    pub themes: Vec<Theme>,
}

/// A theme installed on the shop. Exactly one carries [`ThemeRole::Main`]
/// (the live storefront).
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub role: ThemeRole,
}

/// The publication role of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeRole {
    Main,
    Unpublished,
    Demo,
    Development,
    /// Roles this client does not care about.
    #[serde(other)]
    Other,
}

/// Envelope for `GET themes/{id}/assets.json?asset[key]=…`.
#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    pub asset: Asset,
}

/// A single named file inside a theme.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub key: String,
    /// JSON-encoded document. Binary assets omit this field.
    #[serde(default)]
    pub value: String,
}

/// Envelope for `PUT themes/{id}/assets.json`.
#[derive(Debug, Serialize)]
pub(crate) struct AssetEnvelope<'a> {
    pub asset: AssetPayload<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssetPayload<'a> {
    pub key: &'a str,
    pub value: &'a str,
}
