//! Assist Context - 文档内容辅助（关键信息提取、翻译）

mod errors;
mod messages;
mod run_state;
mod value_objects;

pub use errors::AssistError;
pub use messages::AssistMessages;
pub use run_state::{TaskPhase, TaskRunState, ViewRunStates};
pub use value_objects::{
    DocumentId, PromptTemplate, TaskKind, ViewId, CONTENT_PLACEHOLDER,
    DEFAULT_EXTRACT_TEMPLATE, DEFAULT_TRANSLATE_TEMPLATE,
};
