//! # Record API
//!
//! Request validation, the error taxonomy and the operation handler that
//! sits between the HTTP routes and the record store.

pub mod errors;
pub mod handler;
pub mod request;
pub mod response;

pub use errors::{ApiError, ApiResult};
pub use handler::{observe_failure, RecordHandler};
pub use request::{AmountInput, CreateRecordRequest, UpdateRecordRequest, MAX_TEXT_LEN};
pub use response::{DeletedResponse, HealthResponse, MessageBody};
