//! Fake Completion Client - 不访问网络的补全客户端
//!
//! 按脚本返回固定结果并模拟延迟，同样与 deadline 竞速。
//! 用于测试，以及没有 API 密钥时本地运行服务

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::race::race_deadline;
use crate::application::ports::{
    CompletionBody, CompletionChoice, CompletionEnginePort, CompletionMessage, CompletionOutcome,
    CompletionRequest,
};

/// 脚本化的响应
#[derive(Debug, Clone, PartialEq)]
pub enum FakeReply {
    /// 2xx，choices[0].message.content
    Content(Option<String>),
    /// 非 2xx 状态码
    Status(u16),
    /// 网络层失败
    Transport(String),
    /// 2xx 但响应体无法解析
    Malformed,
}

impl FakeReply {
    pub fn content(text: impl Into<String>) -> Self {
        FakeReply::Content(Some(text.into()))
    }

    fn into_outcome(self) -> CompletionOutcome {
        match self {
            FakeReply::Content(content) => CompletionOutcome::Success(CompletionBody {
                choices: vec![CompletionChoice {
                    message: Some(CompletionMessage { content }),
                }],
            }),
            FakeReply::Status(401) => CompletionOutcome::AuthError,
            FakeReply::Status(status) => CompletionOutcome::HttpError { status },
            FakeReply::Transport(message) => CompletionOutcome::UnknownError { message },
            FakeReply::Malformed => CompletionOutcome::Malformed {
                message: "expected value at line 1 column 1".to_string(),
            },
        }
    }
}

type Responder = dyn Fn(&CompletionRequest) -> (Duration, FakeReply) + Send + Sync;

/// Fake Completion Client
#[derive(Clone)]
pub struct FakeCompletionClient {
    responder: Arc<Responder>,
    latency: Duration,
    /// 收到的请求（按到达顺序）
    received: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl FakeCompletionClient {
    /// 每次都返回同一结果
    pub fn fixed(reply: FakeReply) -> Self {
        Self::from_fn(move |_| (Duration::ZERO, reply.clone()))
    }

    /// 根据请求决定延迟和结果
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> (Duration, FakeReply) + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: Duration::ZERO,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 回显请求摘要，本地运行时使用
    pub fn echo() -> Self {
        Self::from_fn(|request| {
            let chars: usize = request
                .messages
                .iter()
                .map(|m| m.content.chars().count())
                .sum();
            (
                Duration::from_millis(200),
                FakeReply::content(format!("[{}] prompt of {} chars", request.model, chars)),
            )
        })
    }

    /// 在脚本延迟之外追加固定延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 已收到的请求
    pub fn received(&self) -> Vec<CompletionRequest> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionEnginePort for FakeCompletionClient {
    async fn complete(&self, request: &CompletionRequest, deadline: Duration) -> CompletionOutcome {
        if let Ok(mut received) = self.received.lock() {
            received.push(request.clone());
        }
        let (delay, reply) = (self.responder)(request);
        let delay = delay + self.latency;

        tracing::debug!(
            model = %request.model,
            delay_ms = delay.as_millis() as u64,
            "FakeCompletionClient: scripted reply"
        );

        let exchange = async move {
            tokio::time::sleep(delay).await;
            reply.into_outcome()
        };

        race_deadline(exchange, deadline)
            .await
            .unwrap_or(CompletionOutcome::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::user("abc")],
            stream: false,
            max_tokens: 8192,
            temperature: 0.5,
        }
    }

    #[tokio::test]
    async fn test_fixed_reply_recorded() {
        let client = FakeCompletionClient::fixed(FakeReply::content("X"));
        let outcome = client.complete(&request(), Duration::from_secs(1)).await;

        assert!(matches!(&outcome, CompletionOutcome::Success(b) if b.first_content() == Some("X")));
        assert_eq!(client.received().len(), 1);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let client = FakeCompletionClient::fixed(FakeReply::Status(401));
        assert_eq!(
            client.complete(&request(), Duration::from_secs(1)).await,
            CompletionOutcome::AuthError
        );

        let client = FakeCompletionClient::fixed(FakeReply::Status(429));
        assert_eq!(
            client.complete(&request(), Duration::from_secs(1)).await,
            CompletionOutcome::HttpError { status: 429 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_beyond_deadline_times_out() {
        let client = FakeCompletionClient::fixed(FakeReply::content("late"))
            .with_latency(Duration::from_millis(151_000));
        assert_eq!(
            client.complete(&request(), Duration::from_millis(150_000)).await,
            CompletionOutcome::Timeout
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_echo_describes_prompt() {
        let outcome = FakeCompletionClient::echo()
            .complete(&request(), Duration::from_secs(1))
            .await;
        match outcome {
            CompletionOutcome::Success(body) => {
                assert_eq!(body.first_content(), Some("[m] prompt of 3 chars"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
