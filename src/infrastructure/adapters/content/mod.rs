//! Content Adapter - 文档内容获取实现

mod http_content_fetcher;

pub use http_content_fetcher::*;
