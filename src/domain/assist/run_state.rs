//! Assist Context - 任务运行状态
//!
//! 每个视图为每种任务类型持有一份 TaskRunState，
//! 生命周期: Idle → Loading → {Succeeded, Failed}，重新触发会再次进入 Loading

use serde::{Deserialize, Serialize};

use super::TaskKind;

/// 任务阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl TaskPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPhase::Idle => "idle",
            TaskPhase::Loading => "loading",
            TaskPhase::Succeeded => "succeeded",
            TaskPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskPhase::Succeeded | TaskPhase::Failed)
    }
}

/// 单个任务槽位的可见状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunState {
    pub is_loading: bool,
    pub output_text: String,
    pub phase: TaskPhase,
    /// 最近一次进入 Loading 的调用编号，从未触发为 0
    pub epoch: u64,
}

impl Default for TaskRunState {
    fn default() -> Self {
        Self {
            is_loading: false,
            output_text: String::new(),
            phase: TaskPhase::Idle,
            epoch: 0,
        }
    }
}

impl TaskRunState {
    /// 进入 Loading：清空输出
    pub fn enter_loading(&mut self, epoch: u64) {
        self.epoch = epoch;
        self.output_text.clear();
        self.is_loading = true;
        self.phase = TaskPhase::Loading;
    }

    /// 写入终态结果
    pub fn settle(&mut self, output: impl Into<String>, phase: TaskPhase) {
        debug_assert!(phase.is_terminal());
        self.output_text = output.into();
        self.is_loading = false;
        self.phase = phase;
    }
}

/// 一个视图的两个任务槽位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRunStates {
    pub extract: TaskRunState,
    pub translate: TaskRunState,
}

impl ViewRunStates {
    pub fn get(&self, kind: TaskKind) -> &TaskRunState {
        match kind {
            TaskKind::Extract => &self.extract,
            TaskKind::Translate => &self.translate,
        }
    }

    pub fn get_mut(&mut self, kind: TaskKind) -> &mut TaskRunState {
        match kind {
            TaskKind::Extract => &mut self.extract,
            TaskKind::Translate => &mut self.translate,
        }
    }
}
