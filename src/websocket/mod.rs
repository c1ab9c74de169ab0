//! Websocket support stuff
//!
//! Handshake is done by the server implementation, this module contains
//! the frame codec, accept keys and the dispatcher loop that runs on an
//! upgraded connection.

use std::borrow::Cow;

mod alloc;
mod config;
mod dispatcher;
mod error;
mod keys;
mod mask;
mod zero_copy;

pub use self::alloc::Packet;
pub use self::dispatcher::{Dispatcher, Loop, LoopState};
pub use self::error::{Error, ErrorEnum};
pub use self::keys::{Accept, Key, GUID};
pub use self::mask::{UnmaskTrace, apply_mask, log_unmask};
pub use self::zero_copy::{Frame, Opcode, MAX_PAYLOAD_SIZE};
pub use self::zero_copy::{parse_frame, write_packet, write_close};


/// Fine-grained configuration of the websocket connection
#[derive(Debug, Clone)]
pub struct Config {
    guid: Cow<'static, str>,
    max_payload_size: usize,
    unmask_trace: Option<UnmaskTrace>,
}

impl Config {
    pub(crate) fn get_guid(&self) -> &str {
        &self.guid
    }
}
