//! In-memory URL repository and shared application state
//!
//! All records live in a single `HashMap` guarded by one `Mutex`. Every
//! operation (reads included) takes that lock, so callers never see a
//! half-applied update and concurrent click increments are never lost.
//!
//! Records are immutable values: an increment builds a new [`UrlRecord`] and
//! swaps it into the map while the lock is held.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::trace;

use crate::error::RepositoryError;
use crate::utils::generate_short_code;

/// A shortened URL together with its click counter
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UrlRecord {
    /// Destination the short code redirects to
    pub original_url: String,

    /// Creation time in seconds since the Unix epoch (microsecond precision)
    pub created_at: f64,

    /// Number of redirects served for this code
    pub clicks: u64,
}

impl UrlRecord {
    fn new(original_url: String) -> Self {
        Self {
            original_url,
            created_at: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            clicks: 0,
        }
    }

    /// Copy of this record with the click counter advanced by one
    fn clicked(&self) -> Self {
        Self {
            original_url: self.original_url.clone(),
            created_at: self.created_at,
            clicks: self.clicks + 1,
        }
    }
}

/// Concurrency-safe store mapping short codes to [`UrlRecord`]s
///
/// There is no read/write split: `exists` and `get` contend for the same lock
/// as `create` and `increment_clicks`. Critical sections are a lookup or an
/// insert, so hold times stay short.
#[derive(Debug, Default)]
pub struct UrlRepository {
    records: Mutex<HashMap<String, UrlRecord>>,
}

impl UrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the guard cannot leave the map half-written (each
    // critical section is a single insert), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, UrlRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `original_url` under a freshly generated short code and returns the code
    ///
    /// Candidates are regenerated, with the lock held, until one is not yet in
    /// the map. Once all 62^6 codes are taken this loops forever; running out
    /// of keyspace is not handled.
    pub fn create(&self, original_url: impl Into<String>) -> String {
        let mut records = self.lock();

        let mut code = generate_short_code();
        while records.contains_key(&code) {
            trace!(code = %code, "short code collision, regenerating");
            code = generate_short_code();
        }

        records.insert(code.clone(), UrlRecord::new(original_url.into()));
        code
    }

    pub fn exists(&self, code: &str) -> bool {
        self.lock().contains_key(code)
    }

    /// Returns a copy of the current record for `code`
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if the code was never created.
    pub fn get(&self, code: &str) -> Result<UrlRecord, RepositoryError> {
        self.lock()
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(code.to_string()))
    }

    /// Atomically replaces the record for `code` with one carrying `clicks + 1`
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if the code was never created.
    pub fn increment_clicks(&self, code: &str) -> Result<(), RepositoryError> {
        let mut records = self.lock();

        let next = records
            .get(code)
            .map(UrlRecord::clicked)
            .ok_or_else(|| RepositoryError::NotFound(code.to_string()))?;
        records.insert(code.to_string(), next);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Application state shared across all request handlers
///
/// Built once in `main` and handed to the router; the repository is dropped
/// together with the last clone when the server shuts down.
#[derive(Clone, Debug)]
pub struct AppState {
    pub repo: Arc<UrlRepository>,

    /// Public origin used to build `short_url`, e.g. `https://sho.rt`.
    /// Falls back to the request's `Host` header when unset.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(repo: Arc<UrlRepository>) -> Self {
        Self {
            repo,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}
