//! Completion Engine Port - 大模型补全接口抽象
//!
//! 请求/响应结构与 OpenAI 兼容的 chat/completions 接口一致，
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 对话消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 补全请求（即请求体）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// 补全响应体（只解析用到的字段）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionBody {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionBody {
    /// 第一个 choice 的 message.content
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// 补全调用结果
///
/// 网络请求与超时竞速之后的唯一结果
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// 2xx 且响应体可解析
    Success(CompletionBody),
    /// 2xx 但响应体无法解析
    Malformed { message: String },
    /// 超时先于响应到达
    Timeout,
    /// HTTP 401
    AuthError,
    /// 其他非 2xx
    HttpError { status: u16 },
    /// 网络层失败等
    UnknownError { message: String },
}

impl CompletionOutcome {
    pub fn kind_str(&self) -> &'static str {
        match self {
            CompletionOutcome::Success(_) => "success",
            CompletionOutcome::Malformed { .. } => "malformed",
            CompletionOutcome::Timeout => "timeout",
            CompletionOutcome::AuthError => "auth_error",
            CompletionOutcome::HttpError { .. } => "http_error",
            CompletionOutcome::UnknownError { .. } => "unknown_error",
        }
    }
}

/// Completion Engine Port
#[async_trait]
pub trait CompletionEnginePort: Send + Sync {
    /// 发送补全请求，与 `deadline` 竞速
    ///
    /// 超时后返回 [`CompletionOutcome::Timeout`]，未完成的请求被丢弃，
    /// 之后的响应不会产生任何效果
    async fn complete(&self, request: &CompletionRequest, deadline: Duration) -> CompletionOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            model: "THUDM/GLM-4-32B-0414".to_string(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
            max_tokens: 8192,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "THUDM/GLM-4-32B-0414");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 8192);
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_first_content_tolerates_missing_fields() {
        let body: CompletionBody =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"X"}}],"id":"a"}"#).unwrap();
        assert_eq!(body.first_content(), Some("X"));

        let body: CompletionBody = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(body.first_content(), None);

        let body: CompletionBody =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(body.first_content(), None);

        let body: CompletionBody = serde_json::from_str(r#"{"object":"error"}"#).unwrap();
        assert_eq!(body.first_content(), None);
    }
}
