//! Assist Command Handlers

use std::sync::Arc;

use crate::application::commands::assist_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::ViewRegistryPort;
use crate::application::services::TaskOrchestrator;

/// RunAssistTask Handler - 在后台启动一次提取/翻译
pub struct RunAssistTaskHandler {
    view_registry: Arc<dyn ViewRegistryPort>,
    orchestrator: Arc<TaskOrchestrator>,
}

impl RunAssistTaskHandler {
    pub fn new(
        view_registry: Arc<dyn ViewRegistryPort>,
        orchestrator: Arc<TaskOrchestrator>,
    ) -> Self {
        Self {
            view_registry,
            orchestrator,
        }
    }

    pub fn handle(
        &self,
        cmd: RunAssistTaskCommand,
    ) -> Result<RunAssistTaskResponse, ApplicationError> {
        let handle = self
            .view_registry
            .handle(&cmd.view_id)
            .map_err(|_| ApplicationError::not_found("View", &cmd.view_id))?;

        self.view_registry.touch(&cmd.view_id);

        // 取得句柄后视图可能已被关闭
        let epoch = self
            .orchestrator
            .spawn(&handle, cmd.kind)
            .ok_or_else(|| ApplicationError::not_found("View", &cmd.view_id))?;

        Ok(RunAssistTaskResponse {
            view_id: cmd.view_id,
            kind: cmd.kind,
            epoch,
        })
    }
}
