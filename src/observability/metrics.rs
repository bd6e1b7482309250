//! Request counters
//!
//! - Counters only, monotonic, reset on process start
//! - Relaxed atomics; exact under quiescence

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the record API
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    requests: AtomicU64,
    records_listed: AtomicU64,
    records_created: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
    validation_rejections: AtomicU64,
    not_found: AtomicU64,
    service_errors: AtomicU64,
    origin_rejections: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count rows returned by a List call
    pub fn add_records_listed(&self, rows: u64) {
        self.records_listed.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_service_errors(&self) {
        self.service_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_origin_rejections(&self) {
        self.origin_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            records_listed: self.records_listed.load(Ordering::Relaxed),
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            service_errors: self.service_errors.load(Ordering::Relaxed),
            origin_rejections: self.origin_rejections.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub records_listed: u64,
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub validation_rejections: u64,
    pub not_found: u64,
    pub service_errors: u64,
    pub origin_rejections: u64,
}
