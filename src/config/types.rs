//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::services::{
    RequestBuilderConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_MS,
};
use crate::domain::assist::{
    AssistError, AssistMessages, PromptTemplate, DEFAULT_EXTRACT_TEMPLATE,
    DEFAULT_TRANSLATE_TEMPLATE,
};
use crate::domain::DEFAULT_TRUNCATE_CHARS;
use crate::infrastructure::adapters::DEFAULT_COMPLETION_ENDPOINT;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文档内容服务配置
    #[serde(default)]
    pub content: ContentConfig,

    /// 模型补全接口配置
    #[serde(default)]
    pub completion: CompletionConfig,

    /// 提示词模板
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// 用户可见文案
    #[serde(default)]
    pub messages: AssistMessages,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 组装请求构建器配置，模板缺少占位符时报错
    pub fn request_builder_config(&self) -> Result<RequestBuilderConfig, AssistError> {
        Ok(RequestBuilderConfig {
            extract_model: self.completion.models.extract.clone(),
            translate_model: self.completion.models.translate.clone(),
            extract_template: PromptTemplate::new(&self.prompts.extract)?,
            translate_template: PromptTemplate::new(&self.prompts.translate)?,
            max_tokens: self.completion.max_tokens,
            temperature: self.completion.temperature,
            truncate_chars: self.completion.truncate_chars,
        })
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文档内容服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// 文档服务 API 基础 URL，内容接口为 {base_url}/file/{id}/data?size=content
    #[serde(default = "default_content_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_content_timeout")]
    pub timeout_secs: u64,
}

fn default_content_base_url() -> String {
    "http://localhost:8080/docs-web/api".to_string()
}

fn default_content_timeout() -> u64 {
    30
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: default_content_base_url(),
            timeout_secs: default_content_timeout(),
        }
    }
}

/// 模型补全接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// 补全接口完整 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: String,

    /// 单次调用超时（毫秒），包含读取响应体
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 原文截断长度（字符数）
    #[serde(default = "default_truncate_chars")]
    pub truncate_chars: usize,

    /// 每种任务使用的模型
    #[serde(default)]
    pub models: ModelsConfig,

    /// 使用不访问网络的回显引擎（本地调试）
    #[serde(default)]
    pub fake: bool,
}

fn default_endpoint() -> String {
    DEFAULT_COMPLETION_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_truncate_chars() -> usize {
    DEFAULT_TRUNCATE_CHARS
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            truncate_chars: default_truncate_chars(),
            models: ModelsConfig::default(),
            fake: false,
        }
    }
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 模型名称
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_model")]
    pub extract: String,

    #[serde(default = "default_model")]
    pub translate: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            extract: default_model(),
            translate: default_model(),
        }
    }
}

/// 提示词模板，`{content}` 处插入截断后的原文
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_extract_prompt")]
    pub extract: String,

    #[serde(default = "default_translate_prompt")]
    pub translate: String,
}

fn default_extract_prompt() -> String {
    DEFAULT_EXTRACT_TEMPLATE.to_string()
}

fn default_translate_prompt() -> String {
    DEFAULT_TRANSLATE_TEMPLATE.to_string()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            extract: default_extract_prompt(),
            translate: default_translate_prompt(),
        }
    }
}

/// GC（空闲视图回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 视图空闲过期时间（秒）
    #[serde(default = "default_view_expire")]
    pub view_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    60
}

fn default_view_expire() -> u64 {
    1800 // 30 分钟
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            view_expire_secs: default_view_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assist::TaskKind;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:5070");
        assert_eq!(config.completion.timeout(), Duration::from_millis(150_000));
        assert_eq!(config.completion.max_tokens, 8192);
        assert_eq!(config.completion.truncate_chars, 115_000);
        assert_eq!(config.completion.models.extract, "THUDM/GLM-4-32B-0414");
        assert_eq!(config.messages.timeout, "请求超时，请稍后重试");
        assert!(!config.completion.fake);
    }

    #[test]
    fn test_request_builder_config_from_defaults() {
        let config = AppConfig::default();
        let rb = config.request_builder_config().unwrap();
        assert_eq!(rb.extract_template, PromptTemplate::default_for(TaskKind::Extract));
        assert_eq!(rb.translate_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = AppConfig::default();
        config.prompts.translate = "翻译一下".to_string();
        assert!(config.request_builder_config().is_err());
    }
}
