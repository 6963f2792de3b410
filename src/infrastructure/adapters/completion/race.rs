//! 超时竞速
//!
//! 请求 future 与计时器竞速，先完成者决定结果，另一方被直接丢弃：
//! - 请求先完成：计时器被 drop，不再触发
//! - 计时器先到：请求 future 被 drop，reqwest 会中止底层连接

use std::future::Future;
use std::time::Duration;

/// 在 `deadline` 内完成则返回 `Some(output)`，否则返回 `None`
///
/// 两者同时就绪时请求优先
pub async fn race_deadline<F>(exchange: F, deadline: Duration) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        output = exchange => Some(output),
        _ = tokio::time::sleep(deadline) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fast_exchange_wins() {
        let result = race_deadline(
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                "done"
            },
            Duration::from_millis(150_000),
        )
        .await;
        assert_eq!(result, Some("done"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_wins_and_loser_never_completes() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let result = race_deadline(
            async move {
                tokio::time::sleep(Duration::from_millis(151_000)).await;
                flag.store(true, Ordering::SeqCst);
            },
            Duration::from_millis(150_000),
        )
        .await;
        assert_eq!(result, None);

        tokio::time::advance(Duration::from_millis(5_000)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_is_the_deadline() {
        let start = tokio::time::Instant::now();
        let result = race_deadline(std::future::pending::<()>(), Duration::from_millis(150_000)).await;
        assert_eq!(result, None);
        assert!(start.elapsed() >= Duration::from_millis(150_000));
        assert!(start.elapsed() < Duration::from_millis(151_000));
    }
}
