//! Worker Layer - Background Task Processing
//!
//! 实现 ViewReaper，定期关闭空闲视图

mod view_reaper;

pub use view_reaper::{ViewReaper, ViewReaperConfig};
