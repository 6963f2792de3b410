//! View Registry Port - 视图生命周期管理
//!
//! 一个视图对应一个打开的文件预览，持有两个任务槽位的状态，
//! 具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::assist::{DocumentId, ViewId, ViewRunStates};

use super::UiStateSink;

/// View Registry 错误
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View not found: {0}")]
    NotFound(ViewId),

    #[error("View already exists: {0}")]
    AlreadyExists(ViewId),
}

/// 视图元数据
#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,
    pub document_id: DocumentId,
    pub last_activity: DateTime<Utc>,
}

impl View {
    pub fn new(document_id: DocumentId) -> Self {
        let now = Utc::now();
        Self {
            id: ViewId::new(),
            document_id,
            last_activity: now,
        }
    }
}

/// 编排器操作一个视图所需的全部句柄
#[derive(Clone)]
pub struct ViewHandle {
    pub view_id: ViewId,
    pub document_id: DocumentId,
    pub sink: Arc<dyn UiStateSink>,
    /// 视图关闭时取消
    pub closed: CancellationToken,
}

/// View Registry Port
pub trait ViewRegistryPort: Send + Sync {
    /// 打开视图，任务槽位初始化为默认状态
    fn open(&self, view: View) -> Result<ViewId, ViewError>;

    /// 获取视图元数据
    fn get(&self, id: &ViewId) -> Result<View, ViewError>;

    /// 获取编排器句柄
    fn handle(&self, id: &ViewId) -> Result<ViewHandle, ViewError>;

    /// 读取当前任务状态
    fn snapshot(&self, id: &ViewId) -> Result<ViewRunStates, ViewError>;

    /// 检查视图是否存在
    fn is_open(&self, id: &ViewId) -> bool;

    /// 关闭视图：取消进行中的任务并丢弃状态
    fn close(&self, id: &ViewId) -> Result<(), ViewError>;

    /// 更新最后活动时间
    fn touch(&self, id: &ViewId);

    /// 获取空闲超时的视图
    fn get_idle_views(&self, idle_timeout_secs: u64) -> Vec<ViewId>;
}
