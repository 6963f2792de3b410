//! WebSocket Handler - 视图任务状态推送

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::assist::{TaskKind, ViewId};
use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::state::AppState;

/// View WebSocket 连接处理
pub async fn view_websocket_handler(
    ws: WebSocketUpgrade,
    Path(view_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let view_id = ViewId::from_uuid(view_id);
    ws.on_upgrade(move |socket| handle_view_socket(socket, view_id, state))
}

async fn handle_view_socket(socket: WebSocket, view_id: ViewId, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 注册事件接收器（先于快照，避免丢失两者之间的变更）
    let mut event_rx = state.event_publisher.register_view(&view_id);

    // 验证视图存在并取得当前快照
    let snapshot = match state.view_registry.snapshot(&view_id) {
        Ok(snapshot) => snapshot,
        Err(_) => {
            tracing::warn!(view_id = %view_id, "WebSocket connection rejected: unknown view");
            state.event_publisher.unregister_view(&view_id);
            let _ = sender.close().await;
            return;
        }
    };

    tracing::info!(view_id = %view_id, "WebSocket connected");

    for kind in TaskKind::ALL {
        let slot = snapshot.get(kind);
        let event = WsEvent::TaskStateChanged {
            view_id: view_id.to_string(),
            kind,
            epoch: slot.epoch,
            is_loading: slot.is_loading,
            phase: slot.phase,
            output: slot.output_text.clone(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if sender.send(Message::Text(json)).await.is_err() {
                return;
            }
        }
    }

    let view_id_for_forward = view_id.clone();
    let view_id_for_receive = view_id.clone();

    // 事件转发任务，视图关闭后通道被移除，recv 返回错误后退出
    let forward_task = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            let closing = matches!(event, WsEvent::ViewClosed { .. });
            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(
                    view_id = %view_id_for_forward,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
            if closing {
                let _ = sender.close().await;
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let view_registry = state.view_registry.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(view_id = %view_id_for_receive, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(view_id = %view_id_for_receive, error = %e, "WebSocket error");
                    break;
                }
                _ => {
                    view_registry.touch(&view_id_for_receive);
                }
            }
        }
    });

    // 等待任一任务完成
    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    tracing::info!(view_id = %view_id, "WebSocket disconnected");
}
