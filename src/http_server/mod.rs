//! # HTTP Server Module
//!
//! Axum server exposing the record API.
//!
//! # Endpoints
//!
//! - `GET /health` - Reachability check
//! - `GET /metrics` - Request counters
//! - `GET /records`, `POST /records` - List and create
//! - `PUT /records/:id`, `DELETE /records/:id` - Update and delete

pub mod config;
pub mod middleware;
pub mod observability_routes;
pub mod record_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use middleware::REQUEST_ID_HEADER;
pub use server::HttpServer;
