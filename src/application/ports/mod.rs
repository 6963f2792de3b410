//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod completion_engine;
mod content_source;
mod ui_state_sink;
mod view_registry;

pub use completion_engine::{
    ChatMessage, CompletionBody, CompletionChoice, CompletionEnginePort, CompletionMessage,
    CompletionOutcome, CompletionRequest,
};
pub use content_source::{ContentSourcePort, FetchError};
pub use ui_state_sink::UiStateSink;
pub use view_registry::{View, ViewError, ViewHandle, ViewRegistryPort};
