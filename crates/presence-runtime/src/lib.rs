//! Runtime layer for the presence analyzer.
//!
//! Owns the configured presence source and hands fully loaded logs to the
//! request handlers.

pub mod data_manager;

pub use presence_core as core;
pub use presence_data as data;
