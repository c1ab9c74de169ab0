use std::mem;
use std::sync::Arc;

use tk_bufstream::Buf;

use websocket::{Dispatcher, Loop, LoopState};
use server::{Config, Error};
use server::headers::{parse_head, RequestKind};
use server::handshake::write_handshake;
use server::plain::{write_plain, write_error_page};
use {Status};


enum State<D: Dispatcher> {
    /// Reading HTTP requests, dispatcher waits for the upgrade
    Handshaking(D),
    /// `101 Switching Protocols` is sent, connection talks websocket
    Framed(Loop<D>),
    /// Nothing is read anymore, connection is closed when output is flushed
    Closing,
}

/// Protocol state of a single connection
///
/// This structure doesn't do any I/O by itself. It's fed with input buffer
/// and writes responses into output buffer. See `Proto` for the future
/// that runs it over a socket.
pub struct Connection<D: Dispatcher> {
    config: Arc<Config>,
    state: State<D>,
}

impl<D: Dispatcher> Connection<D> {
    pub fn new(dispatcher: D, config: &Arc<Config>) -> Connection<D> {
        Connection {
            config: config.clone(),
            state: State::Handshaking(dispatcher),
        }
    }

    /// Returns true when no more input will be processed
    pub fn is_closing(&self) -> bool {
        matches!(self.state, State::Closing)
    }

    /// Returns true after handshake is done
    pub fn is_websocket(&self) -> bool {
        matches!(self.state, State::Framed(..))
    }

    /// Process everything that is buffered in the input
    ///
    /// Consumed bytes are removed from `input`, partial request or frame is
    /// left there until more data arrives.
    pub fn process(&mut self, input: &mut Buf, output: &mut Buf)
        -> Result<(), Error>
    {
        loop {
            let mut closed = false;
            match self.state {
                State::Handshaking(..) => {
                    if !self.read_request(input, output)? {
                        return Ok(());
                    }
                }
                State::Framed(ref mut lp) => {
                    match lp.process(input, output)? {
                        LoopState::Open => return Ok(()),
                        LoopState::Closed => closed = true,
                    }
                }
                State::Closing => {
                    let len = input.len();
                    input.consume(len);
                    return Ok(());
                }
            }
            if closed {
                self.state = State::Closing;
            }
        }
    }

    /// Returns `false` if request is not fully received yet
    fn read_request(&mut self, input: &mut Buf, output: &mut Buf)
        -> Result<bool, Error>
    {
        let (kind, bytes) = match parse_head(&input[..],
                                             &self.config.websocket)?
        {
            Some(pair) => pair,
            None if input.len() > self.config.max_head_size => {
                debug!("Request head is larger than {} bytes",
                    self.config.max_head_size);
                write_error_page(output, Status::RequestHeaderFieldsTooLarge)?;
                self.state = State::Closing;
                return Ok(true);
            }
            None => return Ok(false),
        };
        input.consume(bytes);
        match kind {
            RequestKind::Plain { version, close } => {
                write_plain(output, version, &self.config.plain_body, close)?;
                if close {
                    self.state = State::Closing;
                }
            }
            RequestKind::Upgrade(handshake) => {
                info!("{} connected", handshake.key);
                write_handshake(output, &handshake)?;
                let dispatcher = match
                    mem::replace(&mut self.state, State::Closing)
                {
                    State::Handshaking(d) => d,
                    _ => unreachable!(),
                };
                self.state = State::Framed(
                    Loop::new(dispatcher, &self.config.websocket));
            }
            RequestKind::BadUpgrade => {
                write_error_page(output, Status::BadRequest)?;
                self.state = State::Closing;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use tk_bufstream::Buf;

    use websocket::{Dispatcher, Packet, Error, apply_mask};
    use server::Config;
    use super::Connection;

    struct Reverse;

    impl Dispatcher for Reverse {
        fn text(&mut self, text: &str) -> Result<Option<Packet>, Error> {
            Ok(Some(Packet::Text(text.chars().rev().collect())))
        }
    }

    const UPGRADE: &'static str = "GET / HTTP/1.1\r\n\
        Host: localhost\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
        Sec-WebSocket-Version: 13\r\n\
        \r\n";

    const ACCEPTED: &'static str = "HTTP/1.1 101 Switching Protocols\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
        \r\n";

    fn text_frame(buf: &mut Buf, data: &[u8]) {
        let key = [0x12, 0x34, 0x56, 0x78];
        let mut payload = data.to_vec();
        apply_mask(&mut payload, key);
        buf.extend(&[0x81, 0x80 | data.len() as u8]);
        buf.extend(&key);
        buf.extend(&payload);
    }

    fn connection() -> Connection<Reverse> {
        Connection::new(Reverse, &Config::new().done())
    }

    fn output(buf: &Buf) -> String {
        String::from_utf8_lossy(&buf[..]).into_owned()
    }

    #[test]
    fn upgrade_and_echo() {
        let mut conn = connection();
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(UPGRADE.as_bytes());
        // first frame arrives in the same packet as the request
        text_frame(&mut inp, b"abc");
        conn.process(&mut inp, &mut out).unwrap();
        assert!(conn.is_websocket());
        let mut expected = ACCEPTED.as_bytes().to_vec();
        expected.extend(b"\x81\x03cba");
        assert_eq!(&out[..], &expected[..]);
        assert_eq!(inp.len(), 0);
    }

    #[test]
    fn request_in_pieces() {
        let mut conn = connection();
        let mut inp = Buf::new();
        let mut out = Buf::new();
        for chunk in UPGRADE.as_bytes().chunks(7) {
            assert!(!conn.is_websocket());
            inp.extend(chunk);
            conn.process(&mut inp, &mut out).unwrap();
        }
        assert!(conn.is_websocket());
        assert_eq!(output(&out), ACCEPTED);
    }

    #[test]
    fn plain_requests() {
        let mut conn = connection();
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n\
                     GET /two HTTP/1.1\r\nHost: x\r\n\r\n");
        conn.process(&mut inp, &mut out).unwrap();
        assert!(!conn.is_closing());
        assert_eq!(output(&out).matches("hey there").count(), 2);

        inp.extend(b"GET / HTTP/1.0\r\n\r\n");
        conn.process(&mut inp, &mut out).unwrap();
        assert!(conn.is_closing());
        assert_eq!(output(&out).matches("hey there").count(), 3);
    }

    #[test]
    fn custom_body() {
        let cfg = Config::new().plain_body("hello").done();
        let mut conn = Connection::new(Reverse, &cfg);
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(b"GET / HTTP/1.1\r\n\r\n");
        conn.process(&mut inp, &mut out).unwrap();
        assert!(output(&out).ends_with("\r\n\r\nhello"));
    }

    #[test]
    fn upgrade_without_key() {
        let mut conn = connection();
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(b"GET / HTTP/1.1\r\n\
                     Upgrade: websocket\r\n\
                     Connection: Upgrade\r\n\r\n");
        conn.process(&mut inp, &mut out).unwrap();
        assert!(conn.is_closing());
        assert!(output(&out).starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn head_too_long() {
        let cfg = Config::new().max_head_size(64).done();
        let mut conn = Connection::new(Reverse, &cfg);
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(b"GET / HTTP/1.1\r\n");
        inp.extend(&[b'a'; 100][..]);
        conn.process(&mut inp, &mut out).unwrap();
        assert!(conn.is_closing());
        assert!(output(&out).starts_with("HTTP/1.1 431 "));
    }

    #[test]
    fn bad_frame_is_error() {
        let mut conn = connection();
        let mut inp = Buf::new();
        let mut out = Buf::new();
        inp.extend(UPGRADE.as_bytes());
        inp.extend(&[0x81, 0xFF]);
        assert!(conn.process(&mut inp, &mut out).is_err());
    }

    #[test]
    fn shared_config() {
        let cfg = Config::new().done();
        let a = Connection::new(Reverse, &cfg);
        let b = Connection::new(Reverse, &cfg);
        assert_eq!(Arc::strong_count(&cfg), 3);
        drop((a, b));
    }
}
