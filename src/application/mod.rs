//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ContentSource、CompletionEngine、UiStateSink、ViewRegistry）
//! - services: 请求组装、结果分类、任务编排
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

// Re-exports
pub use commands::{
    // Assist commands
    RunAssistTaskCommand,
    RunAssistTaskResponse,
    // View commands
    CloseViewCommand,
    CloseViewResponse,
    OpenViewCommand,
    OpenViewResponse,
    // Handlers
    handlers::{CloseViewHandler, OpenViewHandler, RunAssistTaskHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Completion engine
    ChatMessage,
    CompletionBody,
    CompletionEnginePort,
    CompletionOutcome,
    CompletionRequest,
    // Content source
    ContentSourcePort,
    FetchError,
    // UI state sink
    UiStateSink,
    // View registry
    View,
    ViewError,
    ViewHandle,
    ViewRegistryPort,
};

pub use queries::{handlers::GetViewStateHandler, GetViewStateQuery, ViewStateResponse};

pub use services::{
    Classified, InvocationOutcome, OutcomeTag, RequestBuilder, RequestBuilderConfig,
    ResponseClassifier, TaskOrchestrator, TaskRequest,
};
