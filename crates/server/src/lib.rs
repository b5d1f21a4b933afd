//! HTTP API server for the rolodex address book.
//!
//! This crate provides:
//! - Contact listing, creation, favorite toggling and deletion
//! - Spreadsheet import and export
//! - Health and Prometheus metrics endpoints
//! - Optional static hosting of the browser UI

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
