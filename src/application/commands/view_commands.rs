//! View Commands - 视图生命周期命令

use crate::domain::assist::{DocumentId, ViewId};

/// 打开视图命令
#[derive(Debug, Clone)]
pub struct OpenViewCommand {
    pub document_id: String,
}

/// 打开视图响应
#[derive(Debug, Clone)]
pub struct OpenViewResponse {
    pub view_id: ViewId,
    pub document_id: DocumentId,
}

/// 关闭视图命令
#[derive(Debug, Clone)]
pub struct CloseViewCommand {
    pub view_id: ViewId,
    pub reason: &'static str,
}

impl CloseViewCommand {
    pub fn by_client(view_id: ViewId) -> Self {
        Self {
            view_id,
            reason: "client_close",
        }
    }

    pub fn idle(view_id: ViewId) -> Self {
        Self {
            view_id,
            reason: "idle_timeout",
        }
    }
}

/// 关闭视图响应
#[derive(Debug, Clone)]
pub struct CloseViewResponse {
    pub view_id: ViewId,
}
