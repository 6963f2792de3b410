//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::assist::{TaskKind, TaskPhase, TaskRunState, ViewId};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// View DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenViewRequest {
    pub document_id: String,
}

#[derive(Debug, Serialize)]
pub struct OpenViewResponseDto {
    pub view_id: ViewId,
    pub document_id: String,
}

/// 只携带 view_id 的请求体（close / state / extract / translate）
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view_id: ViewId,
}

#[derive(Debug, Serialize)]
pub struct TaskStateDto {
    pub is_loading: bool,
    pub output_text: String,
    pub phase: TaskPhase,
    pub epoch: u64,
}

impl TaskStateDto {
    pub fn new(state: TaskRunState, epoch: u64) -> Self {
        Self {
            is_loading: state.is_loading,
            output_text: state.output_text,
            phase: state.phase,
            epoch,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewStateDto {
    pub view_id: ViewId,
    pub document_id: String,
    pub extract: TaskStateDto,
    pub translate: TaskStateDto,
}

// ============================================================================
// Assist DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RunAssistTaskResponseDto {
    pub view_id: ViewId,
    pub kind: TaskKind,
    pub epoch: u64,
}
