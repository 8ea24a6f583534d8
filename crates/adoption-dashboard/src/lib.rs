//! # Adoption Dashboard
//!
//! Web front end for the adoption analysis: a cached procedure dataset,
//! an axum router serving the HTML dashboard and its JSON views, and the
//! command line used to start it.

pub mod cache;
pub mod cli;
pub mod page;
pub mod server;

pub use cache::DatasetCache;
pub use cli::Args;
pub use server::{chart_settings, create_router, serve, AppState};
