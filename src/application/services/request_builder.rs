//! Request Builder - 组装补全请求
//!
//! 纯函数式转换：截断原文 → 套用任务模板 → 固定参数

use crate::application::ports::{ChatMessage, CompletionRequest};
use crate::domain::assist::{DocumentId, PromptTemplate, TaskKind};
use crate::domain::{truncate_chars, DEFAULT_TRUNCATE_CHARS};

/// 默认模型
pub const DEFAULT_MODEL: &str = "THUDM/GLM-4-32B-0414";
/// 默认最大生成 token 数
pub const DEFAULT_MAX_TOKENS: u32 = 8192;
/// 默认采样温度
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// 一次任务调用的输入
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub document_id: DocumentId,
    pub task_kind: TaskKind,
    pub raw_content: String,
    pub prompt_template: PromptTemplate,
}

/// Request Builder 配置
#[derive(Debug, Clone)]
pub struct RequestBuilderConfig {
    pub extract_model: String,
    pub translate_model: String,
    pub extract_template: PromptTemplate,
    pub translate_template: PromptTemplate,
    pub max_tokens: u32,
    pub temperature: f32,
    /// 截断长度（字符数）
    pub truncate_chars: usize,
}

impl Default for RequestBuilderConfig {
    fn default() -> Self {
        Self {
            extract_model: DEFAULT_MODEL.to_string(),
            translate_model: DEFAULT_MODEL.to_string(),
            extract_template: PromptTemplate::default_for(TaskKind::Extract),
            translate_template: PromptTemplate::default_for(TaskKind::Translate),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            truncate_chars: DEFAULT_TRUNCATE_CHARS,
        }
    }
}

/// Request Builder
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: RequestBuilderConfig,
}

impl RequestBuilder {
    pub fn new(config: RequestBuilderConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RequestBuilderConfig::default())
    }

    fn model_for(&self, kind: TaskKind) -> &str {
        match kind {
            TaskKind::Extract => &self.config.extract_model,
            TaskKind::Translate => &self.config.translate_model,
        }
    }

    pub fn template_for(&self, kind: TaskKind) -> &PromptTemplate {
        match kind {
            TaskKind::Extract => &self.config.extract_template,
            TaskKind::Translate => &self.config.translate_template,
        }
    }

    /// 为已获取的原文组装 TaskRequest
    pub fn task_request(
        &self,
        document_id: DocumentId,
        kind: TaskKind,
        raw_content: String,
    ) -> TaskRequest {
        TaskRequest {
            document_id,
            task_kind: kind,
            raw_content,
            prompt_template: self.template_for(kind).clone(),
        }
    }

    /// 组装补全请求
    pub fn build(&self, request: &TaskRequest) -> CompletionRequest {
        let content = truncate_chars(&request.raw_content, self.config.truncate_chars);

        tracing::debug!(
            document_id = %request.document_id,
            kind = %request.task_kind,
            raw_chars = request.raw_content.chars().count(),
            forwarded_chars = content.chars().count(),
            "Completion request built"
        );

        CompletionRequest {
            model: self.model_for(request.task_kind).to_string(),
            messages: vec![ChatMessage::user(request.prompt_template.render(content))],
            stream: false,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DocumentId {
        DocumentId::new("doc-1").unwrap()
    }

    #[test]
    fn test_fixed_parameters() {
        let builder = RequestBuilder::with_defaults();
        let request = builder.build(&builder.task_request(
            doc(),
            TaskKind::Extract,
            "hello world".to_string(),
        ));

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.max_tokens, 8192);
        assert_eq!(request.temperature, 0.5);
        assert!(!request.stream);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert!(request.messages[0].content.contains("hello world"));
    }

    #[test]
    fn test_forwards_exactly_first_115000_chars() {
        let builder = RequestBuilder::new(RequestBuilderConfig {
            extract_template: PromptTemplate::new("{content}").unwrap(),
            ..Default::default()
        });
        let raw: String = "字".repeat(115_000) + &"x".repeat(10);
        let request = builder.build(&builder.task_request(doc(), TaskKind::Extract, raw.clone()));

        let forwarded = &request.messages[0].content;
        assert_eq!(forwarded.chars().count(), 115_000);
        assert!(raw.starts_with(forwarded.as_str()));
        assert!(!forwarded.contains('x'));
    }

    #[test]
    fn test_task_kind_selects_template_and_model() {
        let builder = RequestBuilder::new(RequestBuilderConfig {
            translate_model: "Qwen/Qwen2.5-7B-Instruct".to_string(),
            ..Default::default()
        });

        let extract = builder.build(&builder.task_request(doc(), TaskKind::Extract, "t".into()));
        let translate =
            builder.build(&builder.task_request(doc(), TaskKind::Translate, "t".into()));

        assert_eq!(extract.model, DEFAULT_MODEL);
        assert_eq!(translate.model, "Qwen/Qwen2.5-7B-Instruct");
        assert!(extract.messages[0].content.starts_with("请分析以下内容"));
        assert!(translate.messages[0].content.starts_with("请翻译以下内容为中文"));
    }
}
