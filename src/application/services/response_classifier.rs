//! Response Classifier - 结果分类
//!
//! 竞速结束后执行一次，把补全结果（或内容获取失败）转换为展示文本和错误分类

use serde::Serialize;

use crate::application::ports::{CompletionOutcome, FetchError};
use crate::domain::assist::{AssistMessages, TaskPhase};

/// 结果分类标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTag {
    Success,
    /// 内容接口非 2xx
    FetchError,
    /// 内容接口网络失败
    TransportError,
    TimeoutError,
    AuthError,
    HttpError,
    /// 响应缺失或无法解析，按软失败处理
    ParseError,
    UnknownError,
}

impl OutcomeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeTag::Success => "success",
            OutcomeTag::FetchError => "fetch_error",
            OutcomeTag::TransportError => "transport_error",
            OutcomeTag::TimeoutError => "timeout_error",
            OutcomeTag::AuthError => "auth_error",
            OutcomeTag::HttpError => "http_error",
            OutcomeTag::ParseError => "parse_error",
            OutcomeTag::UnknownError => "unknown_error",
        }
    }
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    pub tag: OutcomeTag,
}

impl Classified {
    pub fn phase(&self) -> TaskPhase {
        match self.tag {
            OutcomeTag::Success => TaskPhase::Succeeded,
            _ => TaskPhase::Failed,
        }
    }
}

/// Response Classifier
#[derive(Debug, Clone, Default)]
pub struct ResponseClassifier {
    messages: AssistMessages,
}

impl ResponseClassifier {
    pub fn new(messages: AssistMessages) -> Self {
        Self { messages }
    }

    /// 分类补全结果
    pub fn classify(&self, outcome: CompletionOutcome) -> Classified {
        match outcome {
            CompletionOutcome::Success(body) => match body.first_content() {
                Some(content) if !content.is_empty() => Classified {
                    text: content.to_string(),
                    tag: OutcomeTag::Success,
                },
                _ => self.no_valid_response(),
            },
            CompletionOutcome::Malformed { message } => {
                tracing::warn!(error = %message, "Completion body could not be parsed");
                self.no_valid_response()
            }
            CompletionOutcome::Timeout => Classified {
                text: self.messages.timeout.clone(),
                tag: OutcomeTag::TimeoutError,
            },
            CompletionOutcome::AuthError => Classified {
                text: self.messages.auth_failed.clone(),
                tag: OutcomeTag::AuthError,
            },
            CompletionOutcome::HttpError { status } => Classified {
                text: self.messages.error(&self.messages.completion_status(status)),
                tag: OutcomeTag::HttpError,
            },
            CompletionOutcome::UnknownError { message } => Classified {
                text: self.messages.error(&message),
                tag: OutcomeTag::UnknownError,
            },
        }
    }

    /// 分类内容获取失败
    pub fn classify_fetch_error(&self, error: &FetchError) -> Classified {
        match error {
            FetchError::Status { status } => Classified {
                text: self.messages.error(&self.messages.fetch_status(*status)),
                tag: OutcomeTag::FetchError,
            },
            FetchError::Transport(detail) => Classified {
                text: self.messages.error(&self.messages.fetch_transport(detail)),
                tag: OutcomeTag::TransportError,
            },
        }
    }

    fn no_valid_response(&self) -> Classified {
        Classified {
            text: self.messages.no_valid_response.clone(),
            tag: OutcomeTag::ParseError,
        }
    }
}
