//! HTTP Completion Client - 调用远程大模型补全接口
//!
//! 实现 CompletionEnginePort trait，通过 HTTP 调用 OpenAI 兼容接口
//!
//! 外部 API:
//! POST https://api.siliconflow.cn/v1/chat/completions
//! Headers: Authorization: Bearer <token>, Content-Type: application/json
//! Request: {"model": "...", "messages": [{"role": "user", "content": "..."}], "stream": false, ...}
//! Response: {"choices": [{"message": {"content": "..."}}], ...}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::race::race_deadline;
use crate::application::ports::{
    CompletionBody, CompletionEnginePort, CompletionOutcome, CompletionRequest,
};

/// 默认补全接口地址
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.siliconflow.cn/v1/chat/completions";

/// HTTP Completion 客户端配置
#[derive(Debug, Clone)]
pub struct HttpCompletionClientConfig {
    /// 补全接口完整 URL
    pub endpoint: String,
    /// Bearer token
    pub api_key: String,
    /// 建立连接超时（秒），整体超时由每次调用的 deadline 控制
    pub connect_timeout_secs: u64,
}

impl Default for HttpCompletionClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            api_key: String::new(),
            connect_timeout_secs: 10,
        }
    }
}

impl HttpCompletionClientConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// HTTP Completion 客户端
pub struct HttpCompletionClient {
    client: Client,
    config: HttpCompletionClientConfig,
}

impl HttpCompletionClient {
    /// 创建新的 HTTP Completion 客户端
    pub fn new(config: HttpCompletionClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// 发送请求并读取完整响应体
    async fn exchange(&self, request: &CompletionRequest) -> CompletionOutcome {
        let response = match self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Completion request failed");
                return CompletionOutcome::UnknownError {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(status = %status.as_u16(), "Completion endpoint rejected credentials");
            return CompletionOutcome::AuthError;
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status.as_u16(),
                body = %error_text,
                "Completion endpoint returned error status"
            );
            return CompletionOutcome::HttpError {
                status: status.as_u16(),
            };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return CompletionOutcome::UnknownError {
                    message: e.to_string(),
                }
            }
        };

        match serde_json::from_slice::<CompletionBody>(&bytes) {
            Ok(body) => CompletionOutcome::Success(body),
            Err(e) => CompletionOutcome::Malformed {
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl CompletionEnginePort for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest, deadline: Duration) -> CompletionOutcome {
        tracing::debug!(
            url = %self.config.endpoint,
            model = %request.model,
            prompt_chars = request.messages.iter().map(|m| m.content.chars().count()).sum::<usize>(),
            deadline_ms = deadline.as_millis() as u64,
            "Sending completion request"
        );

        match race_deadline(self.exchange(request), deadline).await {
            Some(outcome) => outcome,
            None => {
                tracing::warn!(
                    model = %request.model,
                    deadline_ms = deadline.as_millis() as u64,
                    "Completion request timed out"
                );
                CompletionOutcome::Timeout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ChatMessage;
    use axum::{
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "THUDM/GLM-4-32B-0414".to_string(),
            messages: vec![ChatMessage::user("hello world")],
            stream: false,
            max_tokens: 8192,
            temperature: 0.5,
        }
    }

    fn client(endpoint: String, api_key: &str) -> HttpCompletionClient {
        HttpCompletionClient::new(HttpCompletionClientConfig::new(endpoint, api_key)).unwrap()
    }

    const DEADLINE: Duration = Duration::from_secs(10);

    #[test]
    fn test_config_default() {
        let config = HttpCompletionClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_COMPLETION_ENDPOINT);
        assert!(config.api_key.is_empty());
    }

    #[tokio::test]
    async fn test_success_sends_bearer_and_body() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let seen_in_handler = seen.clone();
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen_in_handler.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *seen.lock().unwrap() = Some((auth, body));
                    Json(json!({"id": "c1", "choices": [{"message": {"role": "assistant", "content": "SUMMARY"}}]}))
                }
            }),
        );
        let endpoint = serve(router).await;

        let outcome = client(endpoint, "test-key").complete(&request(), DEADLINE).await;

        match outcome {
            CompletionOutcome::Success(body) => assert_eq!(body.first_content(), Some("SUMMARY")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        let (auth, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(body["model"], "THUDM/GLM-4-32B-0414");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 8192);
        assert_eq!(body["messages"][0]["content"], "hello world");
    }

    #[tokio::test]
    async fn test_401_is_auth_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (AxumStatus::UNAUTHORIZED, "Invalid token") }),
        );
        let endpoint = serve(router).await;

        let outcome = client(endpoint, "bad").complete(&request(), DEADLINE).await;
        assert_eq!(outcome, CompletionOutcome::AuthError);
    }

    #[tokio::test]
    async fn test_other_status_is_http_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "busy") }),
        );
        let endpoint = serve(router).await;

        let outcome = client(endpoint, "k").complete(&request(), DEADLINE).await;
        assert_eq!(outcome, CompletionOutcome::HttpError { status: 503 });
    }

    #[tokio::test]
    async fn test_unparseable_body_is_malformed() {
        let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let endpoint = serve(router).await;

        let outcome = client(endpoint, "k").complete(&request(), DEADLINE).await;
        assert!(matches!(outcome, CompletionOutcome::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"choices": [{"message": {"content": "late"}}]}))
            }),
        );
        let endpoint = serve(router).await;

        let started = std::time::Instant::now();
        let outcome = client(endpoint, "k")
            .complete(&request(), Duration::from_millis(200))
            .await;

        assert_eq!(outcome, CompletionOutcome::Timeout);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unknown_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcome = client(format!("http://{}/v1/chat/completions", addr), "k")
            .complete(&request(), DEADLINE)
            .await;
        assert!(matches!(outcome, CompletionOutcome::UnknownError { .. }));
    }
}
