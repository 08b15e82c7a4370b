//! Source-file owner for the HTTP runtime.
//!
//! Wraps [`load_presence_log`] for a single configured CSV path. By default
//! every call re-parses the file. With caching enabled the parsed log is kept
//! until the file's modification time changes; a reload builds a complete new
//! [`PresenceLog`] and swaps it in, so readers holding the previous
//! [`Arc`] keep a consistent snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant, SystemTime};

use presence_core::error::{PresenceError, Result};
use presence_core::models::PresenceLog;
use presence_data::reader::load_presence_log;

// ── CachedLog ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CachedLog {
    /// Modification time of the file when `log` was parsed.
    modified: SystemTime,
    log: Arc<PresenceLog>,
    /// When this entry was populated.
    loaded_at: Instant,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Loads the presence log for one configured CSV file.
///
/// # Example
/// ```no_run
/// use presence_runtime::data_manager::DataManager;
///
/// let mgr = DataManager::new("runtime/data/sample_data.csv", true);
/// let log = mgr.get_data().expect("presence data");
/// println!("users: {}", log.len());
/// ```
#[derive(Debug)]
pub struct DataManager {
    /// Path of the presence CSV.
    data_path: PathBuf,
    /// Whether parsed logs are reused across calls.
    cache_enabled: bool,
    cache: RwLock<Option<CachedLog>>,
}

impl DataManager {
    /// Create a new manager.
    ///
    /// # Parameters
    /// - `data_path`     – presence CSV to read.
    /// - `cache_enabled` – reuse the parsed log until the file changes.
    pub fn new(data_path: impl Into<PathBuf>, cache_enabled: bool) -> Self {
        Self {
            data_path: data_path.into(),
            cache_enabled,
            cache: RwLock::new(None),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Return the presence log, parsing the file when needed.
    ///
    /// Load failures are always returned to the caller; a stale cached log
    /// is never served in place of a file that can no longer be read.
    pub fn get_data(&self) -> Result<Arc<PresenceLog>> {
        if !self.cache_enabled {
            return load_presence_log(&self.data_path).map(Arc::new);
        }

        let modified = self.modified_time()?;

        if let Some(log) = self.cached_if_fresh(modified) {
            tracing::debug!("returning cached presence log");
            return Ok(log);
        }

        let log = Arc::new(load_presence_log(&self.data_path)?);
        tracing::debug!(
            users = log.len(),
            entries = log.entries_count(),
            "presence cache updated"
        );

        let mut guard = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(CachedLog {
            modified,
            log: Arc::clone(&log),
            loaded_at: Instant::now(),
        });

        Ok(log)
    }

    /// Discard the cached log, forcing the next [`DataManager::get_data`]
    /// call to parse the file.
    pub fn invalidate_cache(&self) {
        let mut guard = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the cached log, or `None` when nothing is cached.
    pub fn cache_age(&self) -> Option<Duration> {
        let guard = self
            .cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.as_ref().map(|c| c.loaded_at.elapsed())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn cached_if_fresh(&self, modified: SystemTime) -> Option<Arc<PresenceLog>> {
        let guard = self
            .cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .as_ref()
            .filter(|c| c.modified == modified)
            .map(|c| Arc::clone(&c.log))
    }

    fn modified_time(&self) -> Result<SystemTime> {
        std::fs::metadata(&self.data_path)
            .and_then(|meta| meta.modified())
            .map_err(|source| PresenceError::FileRead {
                path: self.data_path.clone(),
                source,
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
