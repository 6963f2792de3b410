//! Memory Layer - In-Memory State Management
//!
//! 实现 ViewRegistry，管理打开的视图及其任务槽位的内存状态

mod view_registry;

pub use view_registry::InMemoryViewRegistry;
