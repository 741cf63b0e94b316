//! Request and response bodies for the HTTP API
//!
//! The stored record type lives in [`crate::repository`]; everything here is
//! wire format only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for `POST /api/shorten`
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct ShortenRequest {
    /// The original URL to be shortened. Kept as raw JSON so that an empty
    /// value (`null`, `""`, `0`, `false`, `[]`, `{}`) can be reported as
    /// missing and any other non-string as invalid.
    pub url: Option<Value>,
}

/// Response returned after successfully creating a short code
///
/// # Example
/// ```json
/// {
///   "short_code": "aB3dE9",
///   "short_url": "http://localhost:8080/aB3dE9"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

/// Analytics returned by `GET /api/stats/{code}`
#[derive(Serialize, Deserialize, Debug)]
pub struct StatsResponse {
    /// Destination URL
    pub url: String,

    /// Redirects served so far
    pub clicks: u64,

    /// Seconds since the Unix epoch
    pub created_at: f64,
}

/// Body of `GET /api/health`
#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Body of `GET /`
#[derive(Serialize, Debug)]
pub struct ServiceHealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
