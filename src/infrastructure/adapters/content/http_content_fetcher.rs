//! HTTP Content Fetcher - 读取文档原文
//!
//! 实现 ContentSourcePort trait，调用文档服务的内容接口
//!
//! 内部 API:
//! GET {base_url}/file/{file_id}/data?size=content
//! Response: 200 text body，或非 2xx + 错误信息

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{ContentSourcePort, FetchError};
use crate::domain::assist::DocumentId;

/// HTTP Content Fetcher 配置
#[derive(Debug, Clone)]
pub struct HttpContentFetcherConfig {
    /// 文档服务 API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpContentFetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/docs-web/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpContentFetcherConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Content Fetcher
pub struct HttpContentFetcher {
    client: Client,
    config: HttpContentFetcherConfig,
}

impl HttpContentFetcher {
    /// 创建新的 HTTP Content Fetcher
    pub fn new(config: HttpContentFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取内容 URL
    fn content_url(&self, document_id: &DocumentId) -> String {
        format!(
            "{}/file/{}/data?size=content",
            self.config.base_url.trim_end_matches('/'),
            document_id
        )
    }
}

#[async_trait]
impl ContentSourcePort for HttpContentFetcher {
    async fn fetch_content(&self, document_id: &DocumentId) -> Result<String, FetchError> {
        let url = self.content_url(document_id);
        tracing::debug!(url = %url, "Fetching document content");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    FetchError::Transport(format!("Cannot connect to content service: {}", e))
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                document_id = %document_id,
                status = %status.as_u16(),
                body = %error_text,
                "Content endpoint returned error status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read content: {}", e)))?;

        tracing::debug!(
            document_id = %document_id,
            chars = text.chars().count(),
            "Document content fetched"
        );

        Ok(text)
    }
}
