//! HTTP server for apimock.
//!
//! Accepts any method on any path and answers from the resource store:
//! GET reads, PUT replaces, POST creates a collection child, DELETE
//! removes, OPTIONS is a no-op. Every response carries permissive CORS
//! headers and every request is traced.

pub mod config;
pub mod cors;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::ApimockServer;
