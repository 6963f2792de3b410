//! Assist Context - 面向用户的提示文案
//!
//! 默认中文文案，可通过配置 `[messages]` 覆盖

use serde::Deserialize;

/// 用户可见的结果文案
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssistMessages {
    /// 响应中没有可用内容
    #[serde(default = "default_no_valid_response")]
    pub no_valid_response: String,

    /// 请求超时
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// 认证失败（HTTP 401）
    #[serde(default = "default_auth_failed")]
    pub auth_failed: String,

    /// 通用错误前缀，后接原始错误信息
    #[serde(default = "default_error_prefix")]
    pub error_prefix: String,

    /// 错误信息为空时的兜底
    #[serde(default = "default_unknown_error")]
    pub unknown_error: String,

    /// 获取文件内容失败
    #[serde(default = "default_fetch_failed")]
    pub fetch_failed: String,

    /// 模型接口返回非 2xx
    #[serde(default = "default_completion_failed")]
    pub completion_failed: String,
}

fn default_no_valid_response() -> String {
    "未获取到有效响应".to_string()
}

fn default_timeout() -> String {
    "请求超时，请稍后重试".to_string()
}

fn default_auth_failed() -> String {
    "认证失败，请检查API密钥".to_string()
}

fn default_error_prefix() -> String {
    "错误: ".to_string()
}

fn default_unknown_error() -> String {
    "未知错误".to_string()
}

fn default_fetch_failed() -> String {
    "无法获取文件内容".to_string()
}

fn default_completion_failed() -> String {
    "LLM接口错误".to_string()
}

impl Default for AssistMessages {
    fn default() -> Self {
        Self {
            no_valid_response: default_no_valid_response(),
            timeout: default_timeout(),
            auth_failed: default_auth_failed(),
            error_prefix: default_error_prefix(),
            unknown_error: default_unknown_error(),
            fetch_failed: default_fetch_failed(),
            completion_failed: default_completion_failed(),
        }
    }
}

impl AssistMessages {
    /// `错误: {message}`，message 为空时使用兜底文案
    pub fn error(&self, message: &str) -> String {
        let message = if message.trim().is_empty() {
            self.unknown_error.as_str()
        } else {
            message
        };
        format!("{}{}", self.error_prefix, message)
    }

    /// `无法获取文件内容: HTTP {status}`
    pub fn fetch_status(&self, status: u16) -> String {
        format!("{}: HTTP {}", self.fetch_failed, status)
    }

    /// `无法获取文件内容: {detail}`
    pub fn fetch_transport(&self, detail: &str) -> String {
        format!("{}: {}", self.fetch_failed, detail)
    }

    /// `LLM接口错误: HTTP {status}`
    pub fn completion_status(&self, status: u16) -> String {
        format!("{}: HTTP {}", self.completion_failed, status)
    }
}
