//! Completion Adapter - 大模型补全客户端实现

mod fake_completion_client;
mod http_completion_client;
mod race;

pub use fake_completion_client::{FakeCompletionClient, FakeReply};
pub use http_completion_client::*;
pub use race::race_deadline;
