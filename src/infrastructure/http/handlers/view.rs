//! View Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{CloseViewCommand, GetViewStateQuery, OpenViewCommand};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, OpenViewRequest, OpenViewResponseDto, TaskStateDto, ViewRequest,
    ViewStateDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn open_view(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenViewRequest>,
) -> Result<Json<ApiResponse<OpenViewResponseDto>>, ApiError> {
    let result = state.open_view_handler.handle(OpenViewCommand {
        document_id: req.document_id,
    })?;

    Ok(Json(ApiResponse::success(OpenViewResponseDto {
        view_id: result.view_id,
        document_id: result.document_id.to_string(),
    })))
}

pub async fn close_view(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .close_view_handler
        .handle(CloseViewCommand::by_client(req.view_id))?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn view_state(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ApiResponse<ViewStateDto>>, ApiError> {
    let result = state
        .get_view_state_handler
        .handle(GetViewStateQuery {
            view_id: req.view_id,
        })?;

    Ok(Json(ApiResponse::success(ViewStateDto {
        view_id: result.view_id,
        document_id: result.document_id.to_string(),
        extract: TaskStateDto::new(result.extract, result.extract_epoch),
        translate: TaskStateDto::new(result.translate, result.translate_epoch),
    })))
}
