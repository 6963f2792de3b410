//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Assist Context: 文档内容辅助（提取关键信息 / 翻译）

pub mod assist;

// 共享的文本截断
mod truncation;

pub use truncation::{truncate_chars, DEFAULT_TRUNCATE_CHARS};
