use std::fmt;
use std::str::{from_utf8_unchecked};

use rand::{Rng, thread_rng};
use sha1::Sha1;


/// WebSocket GUID constant (defined in RFC 6455)
pub const GUID: &'static str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

const CHARS: &'static[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                              abcdefghijklmnopqrstuvwxyz\
                              0123456789+/";

/// The `Sec-WebSocket-Accept` header value
///
/// Formats itself as base64 with `Display`, so it can be written straight
/// into the response buffer.
pub struct Accept([u8; 20]);

/// The `Sec-WebSocket-Key` header value
///
/// Servers never need one. It's here to act as a client in tests and tools.
pub struct Key([u8; 16]);

impl Key {
    /// Create a new (random) key, eligible to use for client connection
    pub fn new() -> Key {
        let mut key = [0u8; 16];
        thread_rng().fill_bytes(&mut key);
        Key(key)
    }

    /// Create a key from sixteen nonce bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Key {
        Key(bytes)
    }
}

impl Accept {
    /// Create an Accept header value from a key received in header
    ///
    /// Note: key here is a key as passed in header value (base64-encoded)
    /// despite that it's accepted as bytes (not as 16 bytes stored in Key)
    ///
    /// Note 2: this does not validate a key (which is not required by RFC 6455)
    pub fn from_key_bytes(key: &[u8]) -> Accept {
        Accept::with_guid(key, GUID)
    }

    /// Same as `from_key_bytes` but with configurable GUID
    pub fn with_guid(key: &[u8], guid: &str) -> Accept {
        let mut sha1 = Sha1::new();
        sha1.update(key);
        sha1.update(guid.as_bytes());
        Accept(sha1.digest().bytes())
    }
}

fn encode_base64(src: &[u8], buf: &mut [u8]) {
    for (chunk, out) in src.chunks(3).zip(buf.chunks_mut(4)) {
        let n = ((chunk[0] as usize) << 16) |
                ((*chunk.get(1).unwrap_or(&0) as usize) << 8) |
                 (*chunk.get(2).unwrap_or(&0) as usize);
        out[0] = CHARS[(n >> 18) & 63];
        out[1] = CHARS[(n >> 12) & 63];
        out[2] = if chunk.len() > 1 { CHARS[(n >> 6) & 63] } else { b'=' };
        out[3] = if chunk.len() > 2 { CHARS[n & 63] } else { b'=' };
    }
}

impl fmt::Display for Accept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0u8; 28];
        encode_base64(&self.0, &mut buf);
        fmt::Write::write_str(f, unsafe {
            from_utf8_unchecked(&buf)
        })
    }
}

impl fmt::Debug for Accept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "websocket::Accept({})", self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0u8; 24];
        encode_base64(&self.0, &mut buf);
        fmt::Write::write_str(f, unsafe {
            from_utf8_unchecked(&buf)
        })
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "websocket::Key({})", self)
    }
}
