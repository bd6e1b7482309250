//! HTTP middleware
//!
//! - `origin_guard`: rejects browser requests from origins outside the
//!   allow-list before any handler runs
//! - `access_log`: one `HTTP_REQUEST` line per request, tagged with a
//!   request id that is echoed in `x-request-id`

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::{observe_failure, ApiError};
use crate::observability::{Logger, MetricsRegistry, Timer};

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Origin allow-list shared by the guard
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: Arc<Vec<HeaderValue>>,
    metrics: Arc<MetricsRegistry>,
}

impl OriginGuard {
    pub fn new(allowed: Vec<HeaderValue>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            allowed: Arc::new(allowed),
            metrics,
        }
    }

    /// Exact scheme+host+port match
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
    }
}

/// Requests without an `Origin` header are not cross-origin browser calls
/// and pass through.
pub async fn origin_guard(
    State(guard): State<OriginGuard>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !guard.allows(origin) {
            let err = ApiError::OriginRejected(
                String::from_utf8_lossy(origin.as_bytes()).into_owned(),
            );
            observe_failure(&guard.metrics, &err);
            return err.into_response();
        }
    }
    next.run(request).await
}

pub async fn access_log(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    metrics.increment_requests();
    let timer = Timer::new();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let duration_ms = timer.elapsed_ms();
    Logger::info(
        "HTTP_REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", response.status().as_str()),
            ("duration_ms", duration_ms.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    response
}
