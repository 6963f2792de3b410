//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloseViewHandler, OpenViewHandler, RunAssistTaskHandler,
    // Query handlers
    GetViewStateHandler,
    // Ports
    ViewRegistryPort,
    // Services
    TaskOrchestrator,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub view_registry: Arc<dyn ViewRegistryPort>,
    pub orchestrator: Arc<TaskOrchestrator>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub open_view_handler: OpenViewHandler,
    pub close_view_handler: CloseViewHandler,
    pub run_assist_task_handler: RunAssistTaskHandler,

    // ========== Query Handlers ==========
    pub get_view_state_handler: GetViewStateHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        view_registry: Arc<dyn ViewRegistryPort>,
        orchestrator: Arc<TaskOrchestrator>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            // Command handlers
            open_view_handler: OpenViewHandler::new(view_registry.clone()),
            close_view_handler: CloseViewHandler::new(
                view_registry.clone(),
                orchestrator.clone(),
                event_publisher.clone(),
            ),
            run_assist_task_handler: RunAssistTaskHandler::new(
                view_registry.clone(),
                orchestrator.clone(),
            ),

            // Query handlers
            get_view_state_handler: GetViewStateHandler::new(
                view_registry.clone(),
                orchestrator.clone(),
            ),

            // Ports
            view_registry,
            orchestrator,
            event_publisher,
        }
    }
}
