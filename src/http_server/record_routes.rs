//! Record HTTP Routes
//!
//! `GET/POST /records`, `PUT/DELETE /records/:id`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::api::{
    ApiError, ApiResult, CreateRecordRequest, DeletedResponse, RecordHandler, UpdateRecordRequest,
};
use crate::store::{Record, RecordId};

/// Create record routes
pub fn record_routes(handler: RecordHandler) -> Router {
    Router::new()
        .route("/records", get(list_handler).post(create_handler))
        .route("/records/:id", put(update_handler).delete(delete_handler))
        .with_state(handler)
}

/// A path id that is not an integer cannot name a record
fn record_id(
    handler: &RecordHandler,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<RecordId> {
    id.map(|Path(id)| id)
        .map_err(|_| handler.reject(ApiError::NotFound))
}

fn json_body<T>(handler: &RecordHandler, body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| handler.reject(ApiError::Validation(rejection.body_text())))
}

async fn list_handler(State(handler): State<RecordHandler>) -> ApiResult<Json<Vec<Record>>> {
    Ok(Json(handler.list().await?))
}

async fn create_handler(
    State(handler): State<RecordHandler>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let request = json_body(&handler, body)?;
    let record = handler.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_handler(
    State(handler): State<RecordHandler>,
    id: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> ApiResult<Json<Record>> {
    let id = record_id(&handler, id)?;
    let request = json_body(&handler, body)?;
    Ok(Json(handler.update(id, request).await?))
}

async fn delete_handler(
    State(handler): State<RecordHandler>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = record_id(&handler, id)?;
    Ok(Json(handler.delete(id).await?))
}
