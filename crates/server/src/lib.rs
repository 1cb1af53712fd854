//! AutoPulse server library.
//!
//! The HTTP API, collection store and notifier, exposed as a library so the
//! binary, the operator CLI and the integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServiceConfig;
pub use routes::app;
pub use state::AppState;
