//! Record operation handler
//!
//! Bridges async HTTP handlers and the blocking `RecordStore`. Each call
//! validates its input, runs exactly one store operation on the blocking
//! pool, and records the outcome in the logs and counters.

use std::sync::Arc;

use crate::observability::{Logger, MetricsRegistry};
use crate::store::{ListOrder, Record, RecordId, RecordStore, SharedStore, StoreResult};

use super::errors::{ApiError, ApiResult};
use super::request::{CreateRecordRequest, UpdateRecordRequest};
use super::response::DeletedResponse;

/// Record operations over an injected store
#[derive(Clone)]
pub struct RecordHandler {
    store: SharedStore,
    metrics: Arc<MetricsRegistry>,
    list_order: ListOrder,
}

impl RecordHandler {
    pub fn new(store: SharedStore, metrics: Arc<MetricsRegistry>, list_order: ListOrder) -> Self {
        Self {
            store,
            metrics,
            list_order,
        }
    }

    /// Declared direction of `list`
    pub fn list_order(&self) -> ListOrder {
        self.list_order
    }

    /// Counters shared with the rest of the server
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// All records, ordered by id in the declared direction
    pub async fn list(&self) -> ApiResult<Vec<Record>> {
        let order = self.list_order;
        let result = self
            .run("Read", move |store| store.list(order))
            .await
            .inspect(|records| self.metrics.add_records_listed(records.len() as u64));
        self.track(result)
    }

    pub async fn create(&self, request: CreateRecordRequest) -> ApiResult<Record> {
        let new = match request.validate() {
            Ok(new) => new,
            Err(err) => return self.track(Err(err)),
        };

        let result = self.run("Create", move |store| store.create(&new)).await;
        if let Ok(record) = &result {
            self.metrics.increment_created();
            Logger::info("RECORD_CREATED", &[("id", record.id.to_string().as_str())]);
        }
        self.track(result)
    }

    pub async fn update(&self, id: RecordId, request: UpdateRecordRequest) -> ApiResult<Record> {
        let patch = match request.into_patch() {
            Ok(patch) => patch,
            Err(err) => return self.track(Err(err)),
        };

        let result = self
            .run("Update", move |store| store.update(id, &patch))
            .await;
        if result.is_ok() {
            self.metrics.increment_updated();
            Logger::info("RECORD_UPDATED", &[("id", id.to_string().as_str())]);
        }
        self.track(result)
    }

    pub async fn delete(&self, id: RecordId) -> ApiResult<DeletedResponse> {
        let result = self
            .run("Delete", move |store| store.delete(id))
            .await
            .map(|()| DeletedResponse::new(id));
        if result.is_ok() {
            self.metrics.increment_deleted();
            Logger::info("RECORD_DELETED", &[("id", id.to_string().as_str())]);
        }
        self.track(result)
    }

    /// Run one store operation on the blocking pool
    async fn run<T, F>(&self, operation: &'static str, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn RecordStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ApiError::Service(format!("{} failed: {}", operation, e)))?
            .map_err(|e| ApiError::from_store(operation, e))
    }

    fn track<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            observe_failure(&self.metrics, err);
        }
        result
    }

    /// Record a failure raised outside the handler (body or path
    /// extraction) and hand it back for the response
    pub fn reject(&self, err: ApiError) -> ApiError {
        observe_failure(&self.metrics, &err);
        err
    }
}

/// Count and log a failure before it becomes a response
pub fn observe_failure(metrics: &MetricsRegistry, err: &ApiError) {
    let message = err.to_string();
    match err {
        ApiError::Validation(_) => {
            metrics.increment_validation_rejections();
            Logger::warn("REQUEST_REJECTED", &[("message", message.as_str())]);
        }
        ApiError::NotFound => metrics.increment_not_found(),
        ApiError::Service(_) => {
            metrics.increment_service_errors();
            Logger::error("REQUEST_FAILED", &[("message", message.as_str())]);
        }
        ApiError::OriginRejected(_) => {
            metrics.increment_origin_rejections();
            Logger::warn("ORIGIN_REJECTED", &[("message", message.as_str())]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryRecordStore, NewRecord, RecordPatch, StoreError};

    /// Store whose every call fails like an unreachable database
    struct UnreachableStore;

    fn unreachable() -> StoreError {
        StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
    }

    impl RecordStore for UnreachableStore {
        fn list(&self, _: ListOrder) -> StoreResult<Vec<Record>> {
            Err(unreachable())
        }
        fn create(&self, _: &NewRecord) -> StoreResult<Record> {
            Err(unreachable())
        }
        fn update(&self, _: RecordId, _: &RecordPatch) -> StoreResult<Record> {
            Err(unreachable())
        }
        fn delete(&self, _: RecordId) -> StoreResult<()> {
            Err(unreachable())
        }
    }

    fn handler_with(store: SharedStore) -> RecordHandler {
        RecordHandler::new(store, Arc::new(MetricsRegistry::new()), ListOrder::Ascending)
    }

    fn create_request(name: &str, amount: f64) -> CreateRecordRequest {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "category": "Finance",
            "amount": amount,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let handler = handler_with(Arc::new(MemoryRecordStore::new()));
        let created = handler.create(create_request("Ada", 10.0)).await.unwrap();

        let listed = handler.list().await.unwrap();
        assert_eq!(listed, vec![created]);

        let snapshot = handler.metrics().snapshot();
        assert_eq!(snapshot.records_created, 1);
        assert_eq!(snapshot.records_listed, 1);
    }

    #[tokio::test]
    async fn test_validation_counted_without_touching_store() {
        let handler = handler_with(Arc::new(UnreachableStore));
        let err = handler
            .create(CreateRecordRequest::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Validation("missing: name, category, amount".to_string())
        );
        let snapshot = handler.metrics().snapshot();
        assert_eq!(snapshot.validation_rejections, 1);
        assert_eq!(snapshot.service_errors, 0);
    }

    #[tokio::test]
    async fn test_unreachable_store_is_service_error() {
        let handler = handler_with(Arc::new(UnreachableStore));
        let err = handler.list().await.unwrap_err();

        match err {
            ApiError::Service(message) => assert!(message.starts_with("Read failed: ")),
            other => panic!("expected service error, got {:?}", other),
        }
        assert_eq!(handler.metrics().snapshot().service_errors, 1);
    }

    #[tokio::test]
    async fn test_write_failures_carry_operation_prefix() {
        let handler = handler_with(Arc::new(UnreachableStore));

        let err = handler.create(create_request("Ada", 1.0)).await.unwrap_err();
        assert!(matches!(&err, ApiError::Service(m) if m.starts_with("Create failed: ")));

        let update: UpdateRecordRequest =
            serde_json::from_value(serde_json::json!({ "amount": 2 })).unwrap();
        let err = handler.update(1, update).await.unwrap_err();
        assert!(matches!(&err, ApiError::Service(m) if m.starts_with("Update failed: ")));

        let err = handler.delete(1).await.unwrap_err();
        assert!(matches!(&err, ApiError::Service(m) if m.starts_with("Delete failed: ")));

        let snapshot = handler.metrics().snapshot();
        assert_eq!(snapshot.service_errors, 3);
        assert_eq!(snapshot.records_created, 0);
        assert_eq!(snapshot.records_deleted, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let handler = handler_with(Arc::new(MemoryRecordStore::new()));
        assert_eq!(handler.delete(999_999).await.unwrap_err(), ApiError::NotFound);
        assert_eq!(handler.metrics().snapshot().not_found, 1);
    }

    #[tokio::test]
    async fn test_declared_order_is_applied() {
        let store: SharedStore = Arc::new(MemoryRecordStore::new());
        let handler =
            RecordHandler::new(store, Arc::new(MetricsRegistry::new()), ListOrder::Descending);
        let a = handler.create(create_request("a", 1.0)).await.unwrap();
        let b = handler.create(create_request("b", 2.0)).await.unwrap();

        let ids: Vec<_> = handler.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
        assert_eq!(handler.list_order(), ListOrder::Descending);
    }
}
