use tk_bufstream::Buf;

use websocket::{Error, Frame};
use websocket::zero_copy::{Opcode, write_packet, write_close};

/// A websocket packet
///
/// Note: unlike `Frame` this has data allocated on the heap so has static
/// lifetime
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Ping packet (with data)
    Ping(Vec<u8>),
    /// Pong packet (with data)
    Pong(Vec<u8>),
    /// Text (utf-8) messsage
    Text(String),
    /// Binary message
    Binary(Vec<u8>),
    /// Close message
    Close(u16, String),
}

impl Packet {
    /// Serialize packet as a single unmasked frame
    pub fn encode(&self, buf: &mut Buf) -> Result<(), Error> {
        use self::Packet::*;
        match *self {
            Ping(ref data) => write_packet(buf, Opcode::Ping, data),
            Pong(ref data) => write_packet(buf, Opcode::Pong, data),
            Text(ref data) => write_packet(buf, Opcode::Text, data.as_bytes()),
            Binary(ref data) => write_packet(buf, Opcode::Binary, data),
            Close(code, ref reason) => write_close(buf, code, reason),
        }
    }
}

impl<'a> From<Frame<'a>> for Packet {
    fn from(frame: Frame<'a>) -> Packet {
        use websocket::Frame as F;
        use self::Packet as P;
        match frame {
            F::Ping(x) => P::Ping(x.to_owned()),
            F::Pong(x) => P::Pong(x.to_owned()),
            F::Text(x) => P::Text(x.to_owned()),
            F::Binary(x) | F::Continuation(x) => P::Binary(x.to_owned()),
            F::Close(c, t) => P::Close(c, t.to_owned()),
        }
    }
}

#[cfg(test)]
mod test {
    use tk_bufstream::Buf;
    use websocket::{Packet, Frame};

    #[test]
    fn encode_text() {
        let mut buf = Buf::new();
        Packet::Text("ok".into()).encode(&mut buf).unwrap();
        assert_eq!(&buf[..], b"\x81\x02ok");
    }

    #[test]
    fn encode_pong() {
        assert_eq!(Packet::from(Frame::Ping(b"x")), Packet::Ping(vec![b'x']));
        let mut buf = Buf::new();
        Packet::Pong(b"x".to_vec()).encode(&mut buf).unwrap();
        assert_eq!(&buf[..], b"\x8a\x01x");
    }

    #[test]
    fn long_close_reason_is_error() {
        let mut buf = Buf::new();
        assert!(Packet::Close(1000, "x".repeat(200)).encode(&mut buf)
            .is_err());
        assert_eq!(buf.len(), 0);
    }
}
