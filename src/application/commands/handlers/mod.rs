//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod assist_handlers;
mod view_handlers;

pub use assist_handlers::*;
pub use view_handlers::*;
