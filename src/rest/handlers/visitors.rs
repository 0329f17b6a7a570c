//! Visitor Handlers
//!
//! JSON endpoints over every visitor service operation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    Extension, Json,
};

use crate::rest::dto::{ApiResponse, LastVisitorDto, MessageDto, UpdateVisitorRequest};
use crate::rest::error::RestError;
use crate::rest::AppState;
use crate::service::parse_id;
use crate::store::Row;

type ApiResult<T> = Result<Json<ApiResponse<T>>, RestError>;

/// Create the visitors table (idempotent)
pub async fn create_table(Extension(state): Extension<Arc<AppState>>) -> ApiResult<MessageDto> {
    let message = state.service.create_table().await?;
    Ok(Json(ApiResponse::success(MessageDto::new(message))))
}

/// Add a visitor
///
/// The body is taken as a plain JSON object so that field types are judged
/// by the validator rather than the extractor.
pub async fn add_visitor(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<MessageDto> {
    let Json(body) = payload.map_err(|e| RestError::bad_request(e.body_text()))?;
    let serde_json::Value::Object(record) = body else {
        return Err(RestError::bad_request("visitor must be a JSON object"));
    };
    let created = state.service.add_visitor_record(&record).await?;
    tracing::info!(id = created.id, "visitor_added");
    Ok(Json(ApiResponse::success(MessageDto::with_id(
        created.to_string(),
        created.id,
    ))))
}

/// List id and name of every visitor
pub async fn list_visitors(Extension(state): Extension<Arc<AppState>>) -> ApiResult<Vec<Row>> {
    let rows = state.service.list_visitors().await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// Get one visitor
pub async fn view_visitor(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Row>> {
    let id = parse_id(&id)?;
    let rows = state.service.view_visitor(id).await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// Update one column of a visitor
pub async fn update_visitor(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateVisitorRequest>, JsonRejection>,
) -> ApiResult<MessageDto> {
    let id = parse_id(&id)?;
    let Json(request) = payload.map_err(|e| RestError::bad_request(e.body_text()))?;
    let updated = state
        .service
        .update_visitor(id, &request.column, &request.value)
        .await?;
    tracing::info!(id, column = %request.column, "visitor_updated");
    Ok(Json(ApiResponse::success(MessageDto::with_id(
        updated.to_string(),
        updated.id,
    ))))
}

/// Delete one visitor
pub async fn delete_visitor(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<MessageDto> {
    let id = parse_id(&id)?;
    let deleted = state.service.delete_visitor(id).await?;
    tracing::info!(id, "visitor_deleted");
    Ok(Json(ApiResponse::success(MessageDto::with_id(
        deleted.to_string(),
        deleted.id,
    ))))
}

/// Delete every visitor
pub async fn delete_all_visitors(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<MessageDto> {
    let message = state.service.delete_all_visitors().await?;
    tracing::info!("all_visitors_deleted");
    Ok(Json(ApiResponse::success(MessageDto::new(message))))
}

/// Id of the most recently added visitor
pub async fn view_last_visitor(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<LastVisitorDto> {
    let id = state.service.view_last_visitor().await?;
    Ok(Json(ApiResponse::success(LastVisitorDto { id })))
}
