use std::borrow::Cow;
use std::sync::Arc;

use server::{Config};
use websocket;

impl Config {
    /// Create a config with defaults
    pub fn new() -> Config {
        Config {
            max_head_size: 16384,
            plain_body: Cow::Borrowed("hey there"),
            websocket: websocket::Config::new().done(),
        }
    }
    /// Maximum size of the request head (request line and headers)
    ///
    /// If the head doesn't fit, client receives
    /// `431 Request Header Fields Too Large` and connection is closed.
    pub fn max_head_size(&mut self, value: usize) -> &mut Self {
        self.max_head_size = value;
        self
    }
    /// Body of the response for plain (not upgrade) HTTP requests
    pub fn plain_body<S: Into<String>>(&mut self, body: S) -> &mut Self {
        self.plain_body = Cow::Owned(body.into());
        self
    }
    /// Configuration of the upgraded websocket connections
    pub fn websocket_config(&mut self, cfg: &Arc<websocket::Config>)
        -> &mut Self
    {
        self.websocket = cfg.clone();
        self
    }
    /// Create a Arc'd config clone to pass to the constructor
    ///
    /// This is just a convenience method.
    pub fn done(&mut self) -> Arc<Config> {
        Arc::new(self.clone())
    }
}
