//! HTTP server protocol implementation
//!
//! Server answers plain HTTP requests with a fixed page and upgrades
//! requests carrying `Sec-WebSocket-Key` to websockets.
use std::borrow::Cow;
use std::sync::Arc;

use websocket;

mod config;
mod connection;
mod error;
mod handshake;
mod headers;
mod plain;
mod proto;

pub use self::connection::Connection;
pub use self::error::Error;
pub use self::handshake::{Handshake, write_handshake};
pub use self::proto::Proto;


/// Fine-grained configuration of the HTTP server
#[derive(Debug, Clone)]
pub struct Config {
    max_head_size: usize,
    plain_body: Cow<'static, str>,
    websocket: Arc<websocket::Config>,
}
