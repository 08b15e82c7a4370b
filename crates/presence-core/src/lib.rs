//! Shared building blocks for the presence analyzer.
//!
//! Holds the in-memory presence model, the error taxonomy, wall-clock time
//! helpers and the runtime settings parsed from the command line.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{PresenceError, Result};
