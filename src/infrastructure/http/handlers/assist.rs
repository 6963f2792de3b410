//! Assist Handlers - 触发关键信息提取 / 翻译
//!
//! 立即返回本次调用的 epoch，结果通过 /api/view/state 或 WebSocket 获取

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::RunAssistTaskCommand;
use crate::domain::assist::TaskKind;
use crate::infrastructure::http::dto::{ApiResponse, RunAssistTaskResponseDto, ViewRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn extract(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ApiResponse<RunAssistTaskResponseDto>>, ApiError> {
    run(&state, req, TaskKind::Extract)
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ApiResponse<RunAssistTaskResponseDto>>, ApiError> {
    run(&state, req, TaskKind::Translate)
}

fn run(
    state: &AppState,
    req: ViewRequest,
    kind: TaskKind,
) -> Result<Json<ApiResponse<RunAssistTaskResponseDto>>, ApiError> {
    let result = state.run_assist_task_handler.handle(RunAssistTaskCommand {
        view_id: req.view_id,
        kind,
    })?;

    Ok(Json(ApiResponse::success(RunAssistTaskResponseDto {
        view_id: result.view_id,
        kind: result.kind,
        epoch: result.epoch,
    })))
}
