//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/view/open         POST  打开文件预览视图
//! - /api/view/close        POST  关闭视图（取消进行中的任务）
//! - /api/view/state        POST  读取两个任务槽位
//! - /api/assist/extract    POST  触发关键信息提取
//! - /api/assist/translate  POST  触发翻译
//! - /ws/view/{id}          WS    视图任务状态事件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/view/:view_id", get(handlers::view_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/view", view_routes())
        .nest("/assist", assist_routes())
}

/// View 路由
fn view_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_view))
        .route("/close", post(handlers::close_view))
        .route("/state", post(handlers::view_state))
}

/// Assist 路由
fn assist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/extract", post(handlers::extract))
        .route("/translate", post(handlers::translate))
}
