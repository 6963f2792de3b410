//! View Reaper - Background Idle View Collector

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::ViewRegistryPort;
use crate::application::{CloseViewCommand, CloseViewHandler};

/// Reaper 配置
#[derive(Debug, Clone)]
pub struct ViewReaperConfig {
    /// 扫描间隔
    pub interval: Duration,
    /// 空闲超过该时长（秒）的视图会被关闭
    pub view_expire_secs: u64,
}

impl Default for ViewReaperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            view_expire_secs: 1800,
        }
    }
}

/// 空闲视图回收器
///
/// 走与客户端关闭相同的 CloseViewHandler，进行中的任务会被取消
pub struct ViewReaper {
    config: ViewReaperConfig,
    view_registry: Arc<dyn ViewRegistryPort>,
    close_handler: CloseViewHandler,
}

impl ViewReaper {
    pub fn new(
        config: ViewReaperConfig,
        view_registry: Arc<dyn ViewRegistryPort>,
        close_handler: CloseViewHandler,
    ) -> Self {
        Self {
            config,
            view_registry,
            close_handler,
        }
    }

    /// 启动 Reaper，直到 shutdown 被取消
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            view_expire_secs = self.config.view_expire_secs,
            "ViewReaper started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        // 第一次 tick 立即返回
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }

        tracing::info!("ViewReaper stopped");
    }

    /// 关闭一轮空闲视图，返回关闭数量
    pub fn sweep(&self) -> usize {
        let idle = self
            .view_registry
            .get_idle_views(self.config.view_expire_secs);
        let mut closed = 0;

        for view_id in idle {
            match self.close_handler.handle(CloseViewCommand::idle(view_id.clone())) {
                Ok(_) => closed += 1,
                // 扫描与关闭之间被客户端关闭
                Err(e) => tracing::debug!(view_id = %view_id, error = %e, "Idle view already gone"),
            }
        }

        if closed > 0 {
            tracing::info!(closed = closed, "Idle views reaped");
        }
        closed
    }
}
