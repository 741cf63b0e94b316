//! HTTP request handlers for the URL shortener API
//!
//! Handlers hold no state of their own. Each one validates its input, calls
//! into the shared [`UrlRepository`](crate::repository::UrlRepository) and
//! turns the outcome into a response:
//! - Health checks
//! - Shortening a URL into a random 6-character code
//! - Redirecting a code to its destination and counting the click
//! - Reporting per-code statistics

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::model::{
    HealthResponse, ServiceHealthResponse, ShortenRequest, ShortenResponse, StatsResponse,
};
use crate::repository::AppState;
use crate::utils::{is_short_code, is_valid_url};

/// `GET /` - service-level health check
pub async fn root() -> Json<ServiceHealthResponse> {
    Json(ServiceHealthResponse {
        status: "healthy",
        service: "URL Shortener API",
    })
}

/// `GET /api/health` - health check for automated monitoring
pub async fn api_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Creates a new short code for a URL
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **201 Created** - `{"short_code": "...", "short_url": "..."}`
/// - **400 Bad Request** - `url` is missing, empty, or not an http(s) URL
///
/// A body that is not valid JSON is treated the same as one without `url`;
/// a non-string `url` is an invalid URL.
/// Invalid URLs never reach the repository.
pub async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = payload.map(|Json(req)| req).unwrap_or_default();

    let long_url = match request.url {
        Some(Value::String(url)) if !url.is_empty() => url,
        Some(ref value) if !is_blank(value) => {
            warn!(url = %value, "Invalid URL");
            return Err(AppError::InvalidUrl);
        }
        _ => {
            warn!("Missing URL in request.");
            return Err(AppError::MissingUrl);
        }
    };

    if !is_valid_url(&long_url) {
        warn!(url = %long_url, "Invalid URL");
        return Err(AppError::InvalidUrl);
    }

    let short_code = state.repo.create(long_url.as_str());
    info!(url = %long_url, code = %short_code, "Shortened URL");

    let short_url = format!("{}/{}", public_base(&state, &headers), short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code,
            short_url,
        }),
    ))
}

/// Redirects a short code to its original URL and counts the click
///
/// # Response
///
/// - **302 Found** - `Location` set to the original URL
/// - **404 Not Found** - `{"error": "Short code not found."}`
/// - **500 Internal Server Error** - the stored URL is not a legal header
///   value; the click is not counted
pub async fn redirect_short_code(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    if !state.repo.exists(&code) {
        debug!(code = %code, well_formed = is_short_code(&code), "Short code not found");
        return Err(AppError::NotFound);
    }

    let record = state.repo.get(&code)?;
    let location = HeaderValue::try_from(record.original_url.as_str()).map_err(|err| {
        error!(code = %code, %err, "Stored URL is not a valid Location header");
        AppError::InvalidRedirectTarget
    })?;

    state.repo.increment_clicks(&code)?;
    info!(code = %code, click = record.clicks + 1, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Returns analytics for a short code
///
/// # Response
///
/// - **200 OK** - `{"url": "...", "clicks": 2, "created_at": 1705501234.567}`
/// - **404 Not Found** - the code was never issued
pub async fn stats(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    if !state.repo.exists(&code) {
        debug!(
            code = %code,
            well_formed = is_short_code(&code),
            "Stats request: short code not found"
        );
        return Err(AppError::NotFound);
    }

    let record = state.repo.get(&code)?;
    Ok(Json(StatsResponse {
        url: record.original_url,
        clicks: record.clicks,
        created_at: record.created_at,
    }))
}

/// JSON values that count as "no URL given"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Origin prepended to short codes: configured base URL, else the `Host`
/// header of the request, else `http://localhost`.
fn public_base(state: &AppState, headers: &HeaderMap) -> String {
    let base = match &state.base_url {
        Some(base) => base.clone(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .filter(|host| !host.is_empty())
                .unwrap_or("localhost");
            format!("http://{host}")
        }
    };
    base.trim_end_matches('/').to_string()
}
