//! UI State Sink Port - 视图状态写入口
//!
//! 由宿主视图实现，编排器在每次状态变更后同步调用

use crate::domain::assist::{TaskKind, TaskPhase};

/// UI State Sink
pub trait UiStateSink: Send + Sync {
    fn set_loading(&self, kind: TaskKind, loading: bool);

    fn set_output(&self, kind: TaskKind, output: &str);

    /// 宿主视图是否仍然存在，视图销毁后不应再写入
    fn is_attached(&self) -> bool {
        true
    }

    /// 进入 Loading：先清空输出，再置 loading
    ///
    /// `epoch` 标识本次调用，需要区分调用的实现可以记录它
    fn enter_loading(&self, kind: TaskKind, _epoch: u64) {
        self.set_output(kind, "");
        self.set_loading(kind, true);
    }

    /// 写入终态：先写输出，再清除 loading
    fn settle(&self, kind: TaskKind, output: &str, _phase: TaskPhase) {
        self.set_output(kind, output);
        self.set_loading(kind, false);
    }
}
