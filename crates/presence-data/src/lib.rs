//! Data layer for the presence analyzer.
//!
//! Loads presence CSV files into a [`presence_core::models::PresenceLog`],
//! reduces a user's entries by weekday and answers the queries served by the
//! HTTP layer.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use presence_core as core;
