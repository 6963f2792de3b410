//! Assist Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AssistError;

/// 任务类型
///
/// 决定提示词模板、模型和输出槽位，两种任务的生命周期互相独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// 提取关键信息
    Extract,
    /// 翻译
    Translate,
}

impl TaskKind {
    pub const ALL: [TaskKind; 2] = [TaskKind::Extract, TaskKind::Translate];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Extract => "extract",
            TaskKind::Translate => "translate",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文档（文件）标识
///
/// 由外部文档系统分配，这里只要求非空且可安全拼入 URL 路径
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, AssistError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AssistError::InvalidDocumentId("文档 ID 不能为空".to_string()));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AssistError::InvalidDocumentId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = AssistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 视图唯一标识（一个打开的文件预览）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 提示词模板中的内容占位符
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// 提示词模板
///
/// 模板必须包含一次 `{content}` 占位符，渲染时只替换第一个占位符，
/// 文档内容本身包含的 `{content}` 不会被再次展开
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    prefix: String,
    suffix: String,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Result<Self, AssistError> {
        let (prefix, suffix) = template
            .split_once(CONTENT_PLACEHOLDER)
            .ok_or_else(|| AssistError::InvalidTemplate(template.to_string()))?;
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// 默认模板（中文输出，纯文本，不要 markdown）
    pub fn default_for(kind: TaskKind) -> Self {
        let template = match kind {
            TaskKind::Extract => DEFAULT_EXTRACT_TEMPLATE,
            TaskKind::Translate => DEFAULT_TRANSLATE_TEMPLATE,
        };
        let (prefix, suffix) = template
            .split_once(CONTENT_PLACEHOLDER)
            .unwrap_or((template, ""));
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn render(&self, content: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + content.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(content);
        out.push_str(&self.suffix);
        out
    }
}

pub const DEFAULT_EXTRACT_TEMPLATE: &str =
    "请分析以下内容并给出中文关键信息：\n\n{content}，请你只生成文字内容，我不要markdown格式，";

pub const DEFAULT_TRANSLATE_TEMPLATE: &str =
    "请翻译以下内容为中文：\n\n{content}，请你只生成文字内容，我不要markdown格式，";
