//! View Queries

use crate::domain::assist::{DocumentId, TaskRunState, ViewId};

/// 查询视图任务状态
#[derive(Debug, Clone)]
pub struct GetViewStateQuery {
    pub view_id: ViewId,
}

/// 视图任务状态
#[derive(Debug, Clone)]
pub struct ViewStateResponse {
    pub view_id: ViewId,
    pub document_id: DocumentId,
    pub extract: TaskRunState,
    pub translate: TaskRunState,
    pub extract_epoch: u64,
    pub translate_epoch: u64,
}
