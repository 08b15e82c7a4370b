//! HTTP layer for the presence analyzer.
//!
//! Exposes the presence queries as a JSON API under `/api/v1` and serves the
//! chart pages that consume it.

pub mod error;
pub mod pages;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, AppState};
pub use server::serve;
