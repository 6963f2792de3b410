//! HTTP Handlers

mod assist;
mod ping;
mod view;
mod websocket;

pub use assist::*;
pub use ping::*;
pub use view::*;
pub use websocket::*;
