//! View Command Handlers

use std::sync::Arc;

use crate::application::commands::view_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{View, ViewRegistryPort};
use crate::application::services::TaskOrchestrator;
use crate::domain::assist::DocumentId;
use crate::infrastructure::events::EventPublisher;

/// OpenView Handler - 打开文件预览视图
pub struct OpenViewHandler {
    view_registry: Arc<dyn ViewRegistryPort>,
}

impl OpenViewHandler {
    pub fn new(view_registry: Arc<dyn ViewRegistryPort>) -> Self {
        Self { view_registry }
    }

    pub fn handle(&self, cmd: OpenViewCommand) -> Result<OpenViewResponse, ApplicationError> {
        let document_id =
            DocumentId::new(cmd.document_id).map_err(|e| ApplicationError::validation(e.to_string()))?;

        let view = View::new(document_id.clone());
        let view_id = self
            .view_registry
            .open(view)
            .map_err(|e| ApplicationError::internal(e.to_string()))?;

        tracing::info!(
            view_id = %view_id,
            document_id = %document_id,
            "View opened"
        );

        Ok(OpenViewResponse {
            view_id,
            document_id,
        })
    }
}

/// CloseView Handler - 关闭视图，取消进行中的任务
#[derive(Clone)]
pub struct CloseViewHandler {
    view_registry: Arc<dyn ViewRegistryPort>,
    orchestrator: Arc<TaskOrchestrator>,
    event_publisher: Arc<EventPublisher>,
}

impl CloseViewHandler {
    pub fn new(
        view_registry: Arc<dyn ViewRegistryPort>,
        orchestrator: Arc<TaskOrchestrator>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            view_registry,
            orchestrator,
            event_publisher,
        }
    }

    pub fn handle(&self, cmd: CloseViewCommand) -> Result<CloseViewResponse, ApplicationError> {
        if !self.view_registry.is_open(&cmd.view_id) {
            return Err(ApplicationError::not_found("View", &cmd.view_id));
        }

        // 发布视图关闭事件
        self.event_publisher
            .publish_view_closed(&cmd.view_id, cmd.reason);

        // 关闭视图（取消进行中的任务）
        self.view_registry
            .close(&cmd.view_id)
            .map_err(|_| ApplicationError::not_found("View", &cmd.view_id))?;

        // 清理 epoch 记录
        self.orchestrator.forget_view(&cmd.view_id);

        // 取消注册事件通道
        self.event_publisher.unregister_view(&cmd.view_id);

        tracing::info!(view_id = %cmd.view_id, reason = cmd.reason, "View closed");

        Ok(CloseViewResponse {
            view_id: cmd.view_id,
        })
    }
}
