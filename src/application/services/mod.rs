//! 应用服务
//!
//! - request_builder: 截断 + 模板 → 补全请求
//! - response_classifier: 补全结果 → 展示文本 + 错误分类
//! - task_orchestrator: 每种任务的状态机，写入视图

mod request_builder;
mod response_classifier;
mod task_orchestrator;

pub use request_builder::{
    RequestBuilder, RequestBuilderConfig, TaskRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
pub use response_classifier::{Classified, OutcomeTag, ResponseClassifier};
pub use task_orchestrator::{
    Invocation, InvocationOutcome, TaskOrchestrator, DEFAULT_TIMEOUT_MS,
};
