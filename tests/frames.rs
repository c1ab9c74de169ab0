extern crate tk_wsecho;
extern crate tk_bufstream;
extern crate rand;

use rand::{Rng, thread_rng};
use tk_bufstream::Buf;

use tk_wsecho::websocket::{Config, Frame, Opcode, Packet};
use tk_wsecho::websocket::{parse_frame, write_packet, apply_mask};


fn masked(first: u8, data: &[u8], key: [u8; 4]) -> Vec<u8> {
    let mut frame = vec![first];
    if data.len() < 126 {
        frame.push(0x80 | data.len() as u8);
    } else {
        frame.extend(&[0x80 | 126, (data.len() >> 8) as u8, data.len() as u8]);
    }
    frame.extend(&key);
    let mut payload = data.to_vec();
    apply_mask(&mut payload, key);
    frame.extend(payload);
    frame
}

#[test]
fn decode_hi() {
    let mut frame = masked(0x81, b"hi", [0x12, 0x34, 0x56, 0x78]);
    assert_eq!(&frame[..2], &[0x81, 0x82]);
    let (frame, bytes) = parse_frame(&mut frame, &Config::new())
        .unwrap().unwrap();
    assert_eq!(frame, Frame::Text("hi"));
    assert_eq!(bytes, 8);
}

#[test]
fn encode_ok() {
    let mut buf = Buf::new();
    write_packet(&mut buf, Opcode::Text, b"ok").unwrap();
    assert_eq!(&buf[..], &[0x81, 0x02, b'o', b'k']);
}

#[test]
fn random_text_round_trip() {
    let mut rng = thread_rng();
    for &len in &[0usize, 1, 125, 126, 127, 1000, 65535] {
        let text: String = rng.gen_ascii_chars().take(len).collect();
        let key: [u8; 4] = rng.gen();
        let mut frame = masked(0x81, text.as_bytes(), key);
        let (decoded, bytes) = parse_frame(&mut frame, &Config::new())
            .unwrap().unwrap();
        assert_eq!(decoded, Frame::Text(&text));
        assert_eq!(bytes, frame.len());
    }
}

#[test]
fn sixty_four_bit_rejected() {
    let mut frame = vec![0x81, 0x80 | 127];
    let err = parse_frame(&mut frame, &Config::new()).unwrap_err();
    assert_eq!(format!("{:?}", err.kind()), "UnsupportedLengthEncoding");
}

#[test]
fn outgoing_too_long() {
    let mut buf = Buf::new();
    let data = vec![b'x'; 70000];
    let err = Packet::Text(String::from_utf8(data).unwrap())
        .encode(&mut buf).unwrap_err();
    assert_eq!(format!("{:?}", err.kind()), "UnsupportedLengthEncoding");
    assert_eq!(buf.len(), 0);
}

#[test]
fn unmasked_rejected_early() {
    // only header and payload, there is no key to wait for
    let mut frame = vec![0x81, 0x05];
    frame.extend(b"hello");
    let err = parse_frame(&mut frame, &Config::new()).unwrap_err();
    assert_eq!(format!("{:?}", err.kind()), "Unmasked");
}

#[test]
fn long_close_reason() {
    let mut buf = Buf::new();
    let err = Packet::Close(1000, "x".repeat(200))
        .encode(&mut buf).unwrap_err();
    assert_eq!(format!("{:?}", err.kind()), "CloseReasonTooLong(200)");
    assert_eq!(buf.len(), 0);
}
