use std::path::{Path, PathBuf};

use presence_core::error::PresenceError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default data file relative to the working directory.
const LOCAL_DATA_CSV: &str = "runtime/data/sample_data.csv";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(tracing_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

/// Map Python-style level names to tracing level names.
fn tracing_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Resolve the presence CSV to serve.
///
/// An explicit path is used as given. Otherwise the following are checked in
/// order and the first that exists wins:
/// 1. `./runtime/data/sample_data.csv`
/// 2. `~/.presence-analyzer/data.csv`
pub fn resolve_data_path(explicit: Option<&Path>) -> Result<PathBuf, PresenceError> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    discover_data_path(Path::new("."), dirs::home_dir().as_deref()).ok_or_else(|| {
        PresenceError::Config(
            "no presence CSV found; pass --data-csv or set PRESENCE_DATA_CSV".to_string(),
        )
    })
}

fn discover_data_path(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = vec![cwd.join(LOCAL_DATA_CSV)];
    if let Some(home) = home {
        candidates.push(home.join(".presence-analyzer").join("data.csv"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
