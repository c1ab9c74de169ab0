use std::borrow::Cow;
use std::sync::Arc;

use websocket::{Config, UnmaskTrace};
use websocket::keys::GUID;
use websocket::zero_copy::MAX_PAYLOAD_SIZE;

impl Config {
    /// Create a config with defaults
    pub fn new() -> Config {
        Config {
            guid: Cow::Borrowed(GUID),
            max_payload_size: MAX_PAYLOAD_SIZE,
            unmask_trace: None,
        }
    }

    /// Set the GUID appended to the client key when computing
    /// `Sec-WebSocket-Accept`
    ///
    /// Default is the one from RFC 6455. Changing it only makes sense in
    /// tests, real clients will refuse any other value.
    pub fn guid<S: Into<String>>(&mut self, guid: S) -> &mut Self {
        self.guid = Cow::Owned(guid.into());
        self
    }

    /// Maximum payload size
    ///
    /// If some frame declares size larger than this, we immediately abort
    /// the connection. Values above 65535 are clamped, as 64-bit lengths
    /// are never decoded.
    pub fn max_payload_size(&mut self, size: usize) -> &mut Self {
        self.max_payload_size = if size > MAX_PAYLOAD_SIZE {
            MAX_PAYLOAD_SIZE
        } else {
            size
        };
        self
    }

    /// Install a hook that is called for every unmasked byte
    ///
    /// Disabled by default. See `websocket::log_unmask` for a hook that
    /// writes each step at `trace` level.
    pub fn unmask_trace(&mut self, hook: UnmaskTrace) -> &mut Self {
        self.unmask_trace = Some(hook);
        self
    }

    /// Create a Arc'd config clone to pass to the constructor
    ///
    /// This is just a convenience method.
    pub fn done(&mut self) -> Arc<Config> {
        Arc::new(self.clone())
    }
}
