//! recordstore - A small record-keeping HTTP API backed by SQLite
//!
//! - `store`: record model and persistence (SQLite or in-memory)
//! - `api`: request validation and the per-operation handler
//! - `http_server`: routes, CORS, origin guard and server lifecycle
//! - `client`: typed admin client for a running API
//! - `cli`: `init`, `serve` and `admin` commands
//! - `observability`: JSON logging and request counters

pub mod api;
pub mod cli;
pub mod client;
pub mod http_server;
pub mod observability;
pub mod store;
