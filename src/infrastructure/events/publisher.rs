//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::assist::{TaskKind, TaskPhase, TaskRunState, ViewId};

/// WebSocket 事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 任务槽位状态变更
    TaskStateChanged {
        view_id: String,
        kind: TaskKind,
        /// 写入该状态的调用编号
        epoch: u64,
        is_loading: bool,
        phase: TaskPhase,
        output: String,
    },
    /// 视图关闭
    ViewClosed { view_id: String, reason: String },
}

/// 事件发布器
pub struct EventPublisher {
    /// view_id -> broadcast sender
    view_channels: DashMap<ViewId, broadcast::Sender<WsEvent>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            view_channels: DashMap::new(),
        }
    }

    /// 注册视图的事件通道
    pub fn register_view(&self, view_id: &ViewId) -> broadcast::Receiver<WsEvent> {
        if let Some(sender) = self.view_channels.get(view_id) {
            return sender.subscribe();
        }

        let (tx, rx) = broadcast::channel(100);
        self.view_channels.insert(view_id.clone(), tx);
        rx
    }

    /// 取消注册视图
    pub fn unregister_view(&self, view_id: &ViewId) {
        self.view_channels.remove(view_id);
    }

    /// 发布任务槽位状态
    pub fn publish_task_state(&self, view_id: &ViewId, kind: TaskKind, state: &TaskRunState) {
        self.publish_to_view(
            view_id,
            WsEvent::TaskStateChanged {
                view_id: view_id.to_string(),
                kind,
                epoch: state.epoch,
                is_loading: state.is_loading,
                phase: state.phase,
                output: state.output_text.clone(),
            },
        );
    }

    /// 发布视图关闭事件
    pub fn publish_view_closed(&self, view_id: &ViewId, reason: &str) {
        self.publish_to_view(
            view_id,
            WsEvent::ViewClosed {
                view_id: view_id.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    /// 发布事件到指定视图
    fn publish_to_view(&self, view_id: &ViewId, event: WsEvent) {
        if let Some(sender) = self.view_channels.get(view_id) {
            if let Err(e) = sender.send(event) {
                tracing::debug!(
                    view_id = %view_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_to_registered_view() {
        let publisher = EventPublisher::new();
        let view_id = ViewId::new();
        let mut rx = publisher.register_view(&view_id);

        let mut state = TaskRunState::default();
        state.enter_loading(4);
        publisher.publish_task_state(&view_id, TaskKind::Extract, &state);

        match rx.recv().await.unwrap() {
            WsEvent::TaskStateChanged {
                kind,
                epoch,
                is_loading,
                phase,
                output,
                ..
            } => {
                assert_eq!(kind, TaskKind::Extract);
                assert_eq!(epoch, 4);
                assert!(is_loading);
                assert_eq!(phase, TaskPhase::Loading);
                assert!(output.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unregistered_view_is_silent() {
        let publisher = EventPublisher::new();
        let view_id = ViewId::new();
        let mut rx = publisher.register_view(&view_id);
        publisher.unregister_view(&view_id);

        // 通道已移除，之后的发布不再投递
        publisher.publish_view_closed(&view_id, "client");
        assert!(rx.recv().await.is_err());
    }

    #[test]
    fn test_event_wire_format() {
        let event = WsEvent::ViewClosed {
            view_id: "v1".to_string(),
            reason: "idle_timeout".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "ViewClosed");
        assert_eq!(json["data"]["reason"], "idle_timeout");

        let event = WsEvent::TaskStateChanged {
            view_id: "v1".to_string(),
            kind: TaskKind::Translate,
            epoch: 7,
            is_loading: false,
            phase: TaskPhase::Failed,
            output: "请求超时，请稍后重试".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["kind"], "translate");
        assert_eq!(json["data"]["phase"], "failed");
        assert_eq!(json["data"]["epoch"], 7);
    }

    #[tokio::test]
    async fn test_register_twice_shares_channel() {
        let publisher = EventPublisher::new();
        let view_id = ViewId::new();
        let mut first = publisher.register_view(&view_id);
        let mut second = publisher.register_view(&view_id);

        publisher.publish_view_closed(&view_id, "client");

        assert!(matches!(first.recv().await.unwrap(), WsEvent::ViewClosed { .. }));
        assert!(matches!(second.recv().await.unwrap(), WsEvent::ViewClosed { .. }));
    }
}
