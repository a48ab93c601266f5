//! HTTP façade over the Shopify Admin theme/asset REST endpoints.
//!
//! Three operations are consumed: list themes, fetch a named asset, and
//! write a named asset back. No call is ever retried; failures carry the
//! upstream status and body so they can be diagnosed from a single attempt.

mod client;
mod error;
mod types;

pub use client::ThemeClient;
pub use error::ThemeApiError;
pub use types::{Asset, Theme, ThemeRole};
