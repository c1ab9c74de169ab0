use httparse;

use websocket;
use server::Error;
use server::handshake::{Handshake, is_upgrade, get_handshake};
use {Version};


/// Number of headers to allocate on a stack
const MIN_HEADERS: usize = 16;
/// A hard limit on the number of headers
const MAX_HEADERS: usize = 1024;


/// What the connection should do with the request
pub enum RequestKind {
    /// Plain HTTP request, answered with the canned page
    Plain {
        version: Version,
        /// `Connection: close`, HTTP/1.0 or request has a body
        close: bool,
    },
    /// Valid websocket upgrade
    Upgrade(Handshake),
    /// Upgrade request without a usable `Sec-WebSocket-Key`
    BadUpgrade,
}

fn is_close(val: &[u8]) -> bool {
    val.split(|&x| x == b',')
        .any(|tok| tok.iter().filter(|&&x| x != b' ' && x != b'\t')
                   .map(|x| x.to_ascii_lowercase())
                   .eq(b"close".iter().cloned()))
}

fn scan_headers(raw: &httparse::Request, cfg: &websocket::Config)
    -> RequestKind
{
    if is_upgrade(&raw.headers[..]) {
        return match get_handshake(&raw.headers[..], cfg) {
            Ok(hs) => RequestKind::Upgrade(hs),
            Err(()) => RequestKind::BadUpgrade,
        };
    }
    let version = Version::from_httparse(raw.version.unwrap_or(1));
    // For HTTP/1.0 we could implement Connection: Keep-Alive
    // but hopefully it's rare enough to ignore nowadays
    let mut close = version == Version::Http10;
    for header in raw.headers.iter() {
        if header.name.eq_ignore_ascii_case("Connection") {
            close |= is_close(header.value);
        } else if header.name.eq_ignore_ascii_case("Transfer-Encoding") {
            // request body is never read, so we can't reuse connection
            close = true;
        } else if header.name.eq_ignore_ascii_case("Content-Length") {
            close |= header.value.iter().any(|&x| x != b'0');
        }
    }
    RequestKind::Plain { version: version, close: close }
}

/// Parse request head from the start of the buffer
///
/// Returns the kind of the request and the size of the head in bytes.
/// `Ok(None)` means the head is not complete yet.
pub fn parse_head(buf: &[u8], cfg: &websocket::Config)
    -> Result<Option<(RequestKind, usize)>, Error>
{
    let mut headers = [httparse::EMPTY_HEADER; MIN_HEADERS];
    {
        let mut raw = httparse::Request::new(&mut headers);
        match raw.parse(buf) {
            Ok(httparse::Status::Complete(bytes)) => {
                return Ok(Some((scan_headers(&raw, cfg), bytes)));
            }
            Ok(httparse::Status::Partial) => return Ok(None),
            Err(httparse::Error::TooManyHeaders) => {}
            Err(e) => return Err(e.into()),
        }
    }
    let mut vec = vec![httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut raw = httparse::Request::new(&mut vec);
    match raw.parse(buf)? {
        httparse::Status::Complete(bytes) => {
            Ok(Some((scan_headers(&raw, cfg), bytes)))
        }
        httparse::Status::Partial => Ok(None),
    }
}
