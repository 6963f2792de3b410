//! View Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ViewRegistryPort;
use crate::application::queries::{GetViewStateQuery, ViewStateResponse};
use crate::application::services::TaskOrchestrator;
use crate::domain::assist::TaskKind;

/// GetViewState Handler - 读取视图的两个任务槽位
pub struct GetViewStateHandler {
    view_registry: Arc<dyn ViewRegistryPort>,
    orchestrator: Arc<TaskOrchestrator>,
}

impl GetViewStateHandler {
    pub fn new(
        view_registry: Arc<dyn ViewRegistryPort>,
        orchestrator: Arc<TaskOrchestrator>,
    ) -> Self {
        Self {
            view_registry,
            orchestrator,
        }
    }

    pub fn handle(&self, query: GetViewStateQuery) -> Result<ViewStateResponse, ApplicationError> {
        let view = self
            .view_registry
            .get(&query.view_id)
            .map_err(|_| ApplicationError::not_found("View", &query.view_id))?;
        let states = self
            .view_registry
            .snapshot(&query.view_id)
            .map_err(|_| ApplicationError::not_found("View", &query.view_id))?;

        Ok(ViewStateResponse {
            extract_epoch: self.orchestrator.current_epoch(&view.id, TaskKind::Extract),
            translate_epoch: self.orchestrator.current_epoch(&view.id, TaskKind::Translate),
            view_id: view.id,
            document_id: view.document_id,
            extract: states.extract,
            translate: states.translate,
        })
    }
}
