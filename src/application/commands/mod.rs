//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod assist_commands;
mod view_commands;

pub mod handlers;

pub use assist_commands::*;
pub use view_commands::*;
