//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "DOCS_ASSIST";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `DOCS_ASSIST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `DOCS_ASSIST_SERVER__PORT=8080`
/// - `DOCS_ASSIST_CONTENT__BASE_URL=http://docs:8080/docs-web/api`
/// - `DOCS_ASSIST_COMPLETION__API_KEY=sk-...`
/// - `DOCS_ASSIST_COMPLETION__TIMEOUT_MS=60000`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 添加配置文件（如果存在），缺省值由 AppConfig 的 serde default 提供
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 2. 添加环境变量（最高优先级）
    // 例如: DOCS_ASSIST_COMPLETION__API_KEY=sk-xxx
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 3. 构建配置
    let config = builder.build()?;

    // 4. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 5. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let fail = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.port == 0 {
        return fail("Server port cannot be 0");
    }

    if config.content.base_url.is_empty() {
        return fail("Content base URL cannot be empty");
    }

    if !config.completion.fake {
        if config.completion.endpoint.is_empty() {
            return fail("Completion endpoint cannot be empty");
        }
        if config.completion.api_key.is_empty() {
            return fail("Completion API key cannot be empty (or set completion.fake = true)");
        }
    }

    if config.completion.timeout_ms == 0 {
        return fail("Completion timeout cannot be 0");
    }

    if config.completion.truncate_chars == 0 {
        return fail("Truncate length cannot be 0");
    }

    if !(0.0..=2.0).contains(&config.completion.temperature) {
        return fail("Temperature must be within [0, 2]");
    }

    if let Err(e) = config.request_builder_config() {
        return Err(ConfigError::ValidationError(e.to_string()));
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return fail("GC interval cannot be 0 when GC is enabled");
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出 API 密钥
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Content Base URL: {}", config.content.base_url);
    if config.completion.fake {
        tracing::info!("Completion: fake echo engine");
    } else {
        tracing::info!("Completion Endpoint: {}", config.completion.endpoint);
    }
    tracing::info!("Completion Timeout: {}ms", config.completion.timeout_ms);
    tracing::info!(
        "Models: extract={}, translate={}",
        config.completion.models.extract,
        config.completion.models.translate
    );
    tracing::info!("Truncate Chars: {}", config.completion.truncate_chars);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("View Expire: {}s", config.gc.view_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid() -> AppConfig {
        let mut config = AppConfig::default();
        config.completion.api_key = "sk-test".to_string();
        config
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_missing_api_key_rejected_unless_fake() {
        let mut config = AppConfig::default();
        assert!(validate_config(&config).is_err());
        config.completion.fake = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = valid();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.content.base_url = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.completion.timeout_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.completion.temperature = 3.0;
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.prompts.extract = "no placeholder".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = valid();
        config.gc.interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
port = 9000

[content]
base_url = "http://docs.internal/api"

[completion]
api_key = "sk-file"
timeout_ms = 5000

[completion.models]
translate = "Qwen/Qwen2.5-7B-Instruct"

[prompts]
translate = "Translate into Chinese:\n{content}"

[messages]
timeout = "timed out"
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.content.base_url, "http://docs.internal/api");
        assert_eq!(config.completion.api_key, "sk-file");
        assert_eq!(config.completion.timeout_ms, 5000);
        assert_eq!(config.completion.models.translate, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(config.completion.models.extract, "THUDM/GLM-4-32B-0414");
        assert_eq!(config.messages.timeout, "timed out");
        assert_eq!(config.messages.auth_failed, "认证失败，请检查API密钥");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let file = write_config(
            r#"
[completion]
fake = true

[prompts]
extract = "missing placeholder"
"#,
        );
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
