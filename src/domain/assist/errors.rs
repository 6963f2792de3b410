//! Assist Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("无效的文档 ID: {0}")]
    InvalidDocumentId(String),

    #[error("提示词模板缺少 {{content}} 占位符: {0}")]
    InvalidTemplate(String),
}
