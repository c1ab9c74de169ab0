use std::io;
use std::fmt;
use std::str::{Utf8Error};

use serde_json;

/// Websocket Error, returned both by the codec and by dispatchers
pub struct Error(ErrorEnum);


quick_error! {
    /// Websocket error kind
    #[derive(Debug)]
    pub enum ErrorEnum {
        /// Socket IO error
        Io(err: io::Error) {
            description("IO error")
            display("IO error: {}", err)
            from()
        }
        /// Frame uses 64-bit length or outgoing payload exceeds 65535 bytes
        UnsupportedLengthEncoding {
            description("64-bit extended payload length is not supported")
        }
        /// Text frame can't be decoded
        InvalidUtf8(err: Utf8Error) {
            description("Error decoding text frame")
            display("Error decoding text frame: {}", err)
            from()
        }
        /// Text message is not valid JSON
        PayloadDecodeFailure(err: serde_json::Error) {
            description("Error decoding message payload")
            display("Error decoding message payload: {}", err)
            from()
        }
        /// Got websocket message with wrong opcode
        InvalidOpcode(code: u8) {
            description("Opcode of the frame is invalid")
            display("Opcode of the frame is invalid: {}", code)
        }
        /// Close frame with a single byte of payload
        InvalidClose {
            description("Close frame payload is malformed")
        }
        /// Close reason doesn't fit into a control frame
        CloseReasonTooLong(len: usize) {
            description("Close reason is longer than 123 bytes")
            display("Close reason is longer than 123 bytes: {}", len)
        }
        /// Got unmasked frame
        Unmasked {
            description("Received unmasked frame")
        }
        /// Got fragmented frame (fragmented frames are not supported)
        Fragmented {
            description("Received fragmented frame")
        }
        /// Binary or continuation frame, which the server doesn't route
        UnsupportedFrame(opcode: u8) {
            description("Received frame of unsupported kind")
            display("Received frame of unsupported kind: opcode {}", opcode)
        }
        /// Received frame that is longer than configured limit
        TooLong(size: u64) {
            description("Received frame that is too long")
            display("Received frame that is too long: {} bytes", size)
        }
        Custom(err: Box<::std::error::Error + Send + Sync>) {
            description("custom error")
            display("custom error: {}", err)
            cause(&**err)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<ErrorEnum> for Error {
    fn from(err: ErrorEnum) -> Self {
        Error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error(ErrorEnum::Io(err))
    }
}

impl From<Utf8Error> for Error {
    fn from(err: Utf8Error) -> Self {
        Error(ErrorEnum::InvalidUtf8(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error(ErrorEnum::PayloadDecodeFailure(err))
    }
}

impl ::std::error::Error for Error {
    fn description(&self) -> &str {
        self.0.description()
    }
    fn cause(&self) -> Option<&::std::error::Error> {
        self.0.cause()
    }
}

impl Error {
    /// Create an error instance wrapping custom error
    pub fn custom<E: Into<Box<::std::error::Error + Send + Sync>>>(err: E)
        -> Error
    {
        Error(ErrorEnum::Custom(err.into()))
    }
    /// Returns the kind of the error
    pub fn kind(&self) -> &ErrorEnum {
        &self.0
    }
}

#[test]
fn send_sync() {
    fn send_sync<T: Send+Sync>(_: T) {}
    send_sync(Error::from(ErrorEnum::UnsupportedLengthEncoding));
}

#[test]
fn display_too_long() {
    assert_eq!(Error::from(ErrorEnum::TooLong(70000)).to_string(),
        "Received frame that is too long: 70000 bytes");
}
