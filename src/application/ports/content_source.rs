//! Content Source Port - 文档原文获取
//!
//! 从内部内容接口读取文档的纯文本内容，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assist::DocumentId;

/// 内容获取错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// 内容接口返回非 2xx
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// 网络层失败（连接、读取 body 等）
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Content Source Port
#[async_trait]
pub trait ContentSourcePort: Send + Sync {
    /// 获取文档原文
    async fn fetch_content(&self, document_id: &DocumentId) -> Result<String, FetchError>;
}
