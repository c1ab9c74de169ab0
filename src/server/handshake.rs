use std::io::{self, Write};

use httparse::Header;
use tk_bufstream::Buf;

use websocket::{self, Accept};
use {Version, Status};
use enums::StatusLine;


/// Websocket handshake extracted from the upgrade request
pub struct Handshake {
    /// The `Sec-WebSocket-Key` as received, for logging only
    pub key: String,
    /// The destination value of `Sec-WebSocket-Accept`
    pub accept: Accept,
}

fn bytes_trim(mut x: &[u8]) -> &[u8] {
    while x.len() > 0 && matches!(x[0], b'\r' | b'\n' | b' ' | b'\t') {
        x = &x[1..];
    }
    while x.len() > 0 && matches!(x[x.len()-1],  b'\r' | b'\n' | b' ' | b'\t')
    {
        x = &x[..x.len()-1];
    }
    return x;
}

/// Returns true if request asks for connection upgrade
///
/// I.e. it has `Upgrade` header and `upgrade` token in `Connection` header.
/// Value of `Upgrade` is not checked.
pub fn is_upgrade(headers: &[Header]) -> bool {
    let mut conn_upgrade = false;
    let mut upgrade = false;
    for h in headers {
        if h.name.eq_ignore_ascii_case("Connection") {
            conn_upgrade |= h.value.split(|&x| x == b',')
                .any(|tok| bytes_trim(tok).eq_ignore_ascii_case(b"upgrade"));
        } else if h.name.eq_ignore_ascii_case("Upgrade") {
            upgrade = true;
        }
    }
    return conn_upgrade && upgrade;
}

/// Extracts handshake from the upgrade request
///
/// Only `Sec-WebSocket-Key` is required, version, protocols and extensions
/// are not looked at. `Err(())` means the request is an upgrade but the key
/// is either missing or duplicated.
pub fn get_handshake(headers: &[Header], cfg: &websocket::Config)
    -> Result<Handshake, ()>
{
    let mut handshake = None;
    for h in headers {
        if h.name.eq_ignore_ascii_case("Sec-WebSocket-Key") {
            if handshake.is_some() {
                debug!("Duplicate Sec-WebSocket-Key");
                return Err(());
            }
            let key = bytes_trim(h.value);
            handshake = Some(Handshake {
                key: String::from_utf8_lossy(key).into_owned(),
                accept: Accept::with_guid(key, cfg.get_guid()),
            });
        }
    }
    handshake.ok_or_else(|| debug!("No Sec-WebSocket-Key in upgrade request"))
}

/// Writes `101 Switching Protocols` response
///
/// After this the connection talks websocket frames.
pub fn write_handshake(buf: &mut Buf, handshake: &Handshake)
    -> Result<(), io::Error>
{
    write!(buf, "{}\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: {}\r\n\
        \r\n",
        StatusLine(Version::Http11, Status::SwitchingProtocols),
        handshake.accept)
}

#[cfg(test)]
mod test {
    use httparse::{Header};
    use tk_bufstream::Buf;

    use websocket::Config;
    use super::{is_upgrade, get_handshake, write_handshake};

    fn h<'a>(name: &'a str, value: &'a str) -> Header<'a> {
        Header { name: name, value: value.as_bytes() }
    }

    #[test]
    fn upgrade_detection() {
        assert!(is_upgrade(&[
            h("Connection", "keep-alive, Upgrade"),
            h("Upgrade", "websocket"),
        ]));
        assert!(!is_upgrade(&[h("Upgrade", "websocket")]));
        assert!(!is_upgrade(&[h("Connection", "upgrade")]));
        assert!(!is_upgrade(&[h("Connection", "close")]));
    }

    #[test]
    fn handshake_response() {
        let hs = get_handshake(&[
            h("Host", "localhost"),
            h("Sec-WebSocket-Key", " dGhlIHNhbXBsZSBub25jZQ== "),
        ], &Config::new()).unwrap();
        assert_eq!(hs.key, "dGhlIHNhbXBsZSBub25jZQ==");
        let mut buf = Buf::new();
        write_handshake(&mut buf, &hs).unwrap();
        assert_eq!(String::from_utf8_lossy(&buf[..]),
            "HTTP/1.1 101 Switching Protocols\r\n\
             Upgrade: websocket\r\n\
             Connection: Upgrade\r\n\
             Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
             \r\n");
    }

    #[test]
    fn header_name_case() {
        assert!(get_handshake(&[
            h("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ=="),
        ], &Config::new()).is_ok());
    }

    #[test]
    fn missing_or_duplicate_key() {
        assert!(get_handshake(&[h("Upgrade", "websocket")],
            &Config::new()).is_err());
        assert!(get_handshake(&[
            h("Sec-WebSocket-Key", "a"),
            h("Sec-WebSocket-Key", "b"),
        ], &Config::new()).is_err());
    }
}
