use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{PresenceError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Serve employee presence statistics from a CSV file
#[derive(Parser, Debug, Clone)]
#[command(
    name = "presence-analyzer",
    about = "Serve employee presence statistics from a CSV file",
    version
)]
pub struct Settings {
    /// Presence CSV file (user_id,date,start,end)
    #[arg(long, env = "PRESENCE_DATA_CSV")]
    pub data_csv: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "PRESENCE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on (1-65535)
    #[arg(long, env = "PRESENCE_PORT", default_value = "5000", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Logging level
    #[arg(long, env = "PRESENCE_LOG_LEVEL", default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Reuse the parsed CSV until the file's modification time changes
    #[arg(long, env = "PRESENCE_CACHE")]
    pub cache: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list so tests
    /// do not depend on the process command line.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| PresenceError::Config(format!("invalid host address \"{}\"", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
