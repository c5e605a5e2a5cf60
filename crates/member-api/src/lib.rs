//! # member-api
//!
//! REST API server for member registration, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_state_with, run, run_server};
pub use state::AppState;
