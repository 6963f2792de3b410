//! Query Handlers 实现

mod view_handlers;

pub use view_handlers::*;
