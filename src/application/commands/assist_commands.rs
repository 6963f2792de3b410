//! Assist Commands - 触发内容辅助任务

use crate::domain::assist::{TaskKind, ViewId};

/// 触发任务命令（提取关键信息 / 翻译）
#[derive(Debug, Clone)]
pub struct RunAssistTaskCommand {
    pub view_id: ViewId,
    pub kind: TaskKind,
}

/// 触发任务响应
///
/// 任务在后台执行，结果通过视图状态查询或 WebSocket 事件获取
#[derive(Debug, Clone)]
pub struct RunAssistTaskResponse {
    pub view_id: ViewId,
    pub kind: TaskKind,
    pub epoch: u64,
}
