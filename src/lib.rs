//! Docs Assist - 文档预览内容辅助网关
//!
//! 对打开的文档执行两项一次性任务：关键信息提取与中文翻译，
//! 每项任务拥有独立的 loading 状态与输出槽位
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Assist Context: 任务类型、提示词模板、任务运行状态、用户文案
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ContentSource, CompletionEngine, UiStateSink, ViewRegistry）
//! - Services: RequestBuilder, ResponseClassifier, TaskOrchestrator
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: ViewRegistry 内存实现
//! - Worker: ViewReaper 空闲视图回收
//! - Adapters: 内容获取客户端, 补全客户端（HTTP / Fake）
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
