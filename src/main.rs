//! Docs Assist - 文档预览内容辅助网关
//!
//! - Domain: assist/ (Bounded Context)
//! - Application: commands, queries, ports, services
//! - Infrastructure: http, memory, worker, adapters, events

use std::sync::Arc;
use std::time::Duration;

use docs_assist::application::ports::{CompletionEnginePort, ViewRegistryPort};
use docs_assist::application::services::{RequestBuilder, ResponseClassifier, TaskOrchestrator};
use docs_assist::application::CloseViewHandler;
use docs_assist::config::{load_config, print_config, AppConfig};
use docs_assist::infrastructure::adapters::{
    FakeCompletionClient, HttpCompletionClient, HttpCompletionClientConfig, HttpContentFetcher,
    HttpContentFetcherConfig,
};
use docs_assist::infrastructure::events::EventPublisher;
use docs_assist::infrastructure::http::{AppState, HttpServer, ServerConfig};
use docs_assist::infrastructure::memory::InMemoryViewRegistry;
use docs_assist::infrastructure::worker::{ViewReaper, ViewReaperConfig};
use tokio_util::sync::CancellationToken;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},docs_assist={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn completion_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn CompletionEnginePort>> {
    if config.completion.fake {
        tracing::warn!("Using fake completion engine, responses are not generated by a model");
        return Ok(Arc::new(FakeCompletionClient::echo()));
    }

    let client = HttpCompletionClient::new(HttpCompletionClientConfig::new(
        &config.completion.endpoint,
        &config.completion.api_key,
    ))?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    init_tracing(&config);

    tracing::info!("Docs Assist - 文档内容辅助网关");
    print_config(&config);

    // 创建内容获取客户端
    let content_source = Arc::new(
        HttpContentFetcher::new(
            HttpContentFetcherConfig::new(&config.content.base_url)
                .with_timeout(config.content.timeout_secs),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create content fetcher: {}", e))?,
    );

    // 创建补全引擎
    let completion_engine = completion_engine(&config)?;

    // 创建任务编排器
    let request_builder = RequestBuilder::new(config.request_builder_config()?);
    let classifier = ResponseClassifier::new(config.messages.clone());
    let orchestrator = TaskOrchestrator::new(
        content_source,
        completion_engine,
        request_builder,
        classifier,
        config.completion.timeout(),
    )
    .arc();

    // 创建事件发布器和视图注册表
    let event_publisher = Arc::new(EventPublisher::new());
    let view_registry: Arc<dyn ViewRegistryPort> =
        Arc::new(InMemoryViewRegistry::new(event_publisher.clone()));

    // 启动空闲视图回收
    let shutdown = CancellationToken::new();
    if config.gc.enabled {
        let reaper = ViewReaper::new(
            ViewReaperConfig {
                interval: Duration::from_secs(config.gc.interval_secs),
                view_expire_secs: config.gc.view_expire_secs,
            },
            view_registry.clone(),
            CloseViewHandler::new(
                view_registry.clone(),
                orchestrator.clone(),
                event_publisher.clone(),
            ),
        );
        tokio::spawn(reaper.run(shutdown.clone()));
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = Arc::new(AppState::new(view_registry, orchestrator, event_publisher));
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    let reaper_shutdown = shutdown.clone();
    server
        .run_with_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
            reaper_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    tracing::info!("Server shutdown complete");

    Ok(())
}
