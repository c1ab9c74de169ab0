use std::str::from_utf8;

use tk_bufstream::Buf;
use byteorder::{BigEndian, ByteOrder};

use websocket::{Config, Error};
use websocket::error::ErrorEnum;
use websocket::mask::apply_mask_traced;


/// Largest payload that fits into 16-bit extended length
pub const MAX_PAYLOAD_SIZE: usize = 65535;

const SEVEN_BIT_MAX: usize = 125;
const SIXTEEN_BIT_MARKER: u8 = 126;
const SIXTY_FOUR_BIT_MARKER: u8 = 127;
const MASK_SIZE: usize = 4;
const MAX_CLOSE_REASON: usize = 123;

/// Frame opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
}

/// A borrowed frame of websocket data
///
/// Payload is already unmasked and points into the connection buffer.
#[derive(Debug, PartialEq)]
pub enum Frame<'a> {
    /// Continuation of a fragmented message
    Continuation(&'a [u8]),
    /// Text (utf-8) message
    Text(&'a str),
    /// Binary message
    Binary(&'a [u8]),
    /// Close message
    Close(u16, &'a str),
    /// Ping mesage
    Ping(&'a [u8]),
    /// Pong mesage
    Pong(&'a [u8]),
}

impl Opcode {
    pub fn from_u8(code: u8) -> Option<Opcode> {
        use self::Opcode::*;
        match code {
            0x0 => Some(Continuation),
            0x1 => Some(Text),
            0x2 => Some(Binary),
            0x8 => Some(Close),
            0x9 => Some(Ping),
            0xA => Some(Pong),
            _ => None,
        }
    }
    pub fn code(self) -> u8 {
        use self::Opcode::*;
        match self {
            Continuation => 0x0,
            Text => 0x1,
            Binary => 0x2,
            Close => 0x8,
            Ping => 0x9,
            Pong => 0xA,
        }
    }
}

impl<'a> Frame<'a> {
    pub fn opcode(&self) -> Opcode {
        use self::Frame::*;
        match *self {
            Continuation(_) => Opcode::Continuation,
            Text(_) => Opcode::Text,
            Binary(_) => Opcode::Binary,
            Close(..) => Opcode::Close,
            Ping(_) => Opcode::Ping,
            Pong(_) => Opcode::Pong,
        }
    }
}

/// Decode payload length from the start of the frame
///
/// Returns payload size and the size of the header up to (not including)
/// the mask key. `Ok(None)` means more bytes are needed.
pub fn decode_length(buf: &[u8]) -> Result<Option<(usize, usize)>, Error> {
    if buf.len() < 2 {
        return Ok(None);
    }
    match buf[1] & 0x7F {
        SIXTEEN_BIT_MARKER => {
            if buf.len() < 4 {
                return Ok(None);
            }
            Ok(Some((BigEndian::read_u16(&buf[2..4]) as usize, 4)))
        }
        SIXTY_FOUR_BIT_MARKER => {
            Err(ErrorEnum::UnsupportedLengthEncoding.into())
        }
        size => Ok(Some((size as usize, 2))),
    }
}

fn parse_close(data: &[u8]) -> Result<(u16, &str), Error> {
    match data.len() {
        // no status code received
        0 => Ok((1005, "")),
        1 => Err(ErrorEnum::InvalidClose.into()),
        _ => Ok((BigEndian::read_u16(&data[..2]), from_utf8(&data[2..])?)),
    }
}

/// Parse a single client frame from the start of the buffer
///
/// Returns the frame and number of bytes it occupies, so the caller can
/// consume them. `Ok(None)` is returned when the buffer holds only
/// a part of the frame, nothing is modified in this case.
pub fn parse_frame<'x>(buf: &'x mut [u8], config: &Config)
    -> Result<Option<(Frame<'x>, usize)>, Error>
{
    use self::Frame::*;

    if buf.len() < 2 {
        return Ok(None);
    }
    // flags are validated as soon as the first two bytes arrive
    let fin = buf[0] & 0x80 != 0;
    let opcode = buf[0] & 0x0F;
    // reserved bits are not checked, no extensions are negotiated
    let mask = buf[1] & 0x80 != 0;
    if !fin {
        return Err(ErrorEnum::Fragmented.into());
    }
    if !mask {
        return Err(ErrorEnum::Unmasked.into());
    }
    let opcode = Opcode::from_u8(opcode)
        .ok_or(ErrorEnum::InvalidOpcode(opcode))?;

    let (size, fsize) = match decode_length(buf)? {
        Some(pair) => pair,
        None => return Ok(None),
    };
    if size > config.max_payload_size {
        return Err(ErrorEnum::TooLong(size as u64).into());
    }
    let start = fsize + MASK_SIZE;
    if buf.len() < start + size {
        return Ok(None);
    }

    let key = [buf[fsize], buf[fsize+1], buf[fsize+2], buf[fsize+3]];
    let data = &mut buf[start..(start + size)];
    apply_mask_traced(data, key, config.unmask_trace);
    let data: &[u8] = data;
    trace!("Received frame {:?} of {} bytes", opcode, size);
    let frame = match opcode {
        Opcode::Continuation => Continuation(data),
        Opcode::Text => Text(from_utf8(data)?),
        Opcode::Binary => Binary(data),
        Opcode::Close => {
            let (code, reason) = parse_close(data)?;
            Close(code, reason)
        }
        Opcode::Ping => Ping(data),
        Opcode::Pong => Pong(data),
    };
    Ok(Some((frame, start + size)))
}

/// Write a single unmasked (server) frame
///
/// Fails with `UnsupportedLengthEncoding` without writing anything if
/// data doesn't fit into 16-bit length.
pub fn write_packet(buf: &mut Buf, opcode: Opcode, data: &[u8])
    -> Result<(), Error>
{
    let first_byte = opcode.code() | 0x80;  // always fin
    match data.len() {
        len @ 0...SEVEN_BIT_MAX => {
            buf.extend(&[first_byte, len as u8]);
        }
        len @ 126...MAX_PAYLOAD_SIZE => {
            buf.extend(&[first_byte, SIXTEEN_BIT_MARKER,
                (len >> 8) as u8, (len & 0xFF) as u8]);
        }
        _ => return Err(ErrorEnum::UnsupportedLengthEncoding.into()),
    }
    buf.extend(data);
    Ok(())
}

/// Write close message to websocket
///
/// Control frame payload is limited to 125 bytes, so the reason can't be
/// longer than 123 bytes. Nothing is written if it is.
pub fn write_close(buf: &mut Buf, code: u16, reason: &str)
    -> Result<(), Error>
{
    let data = reason.as_bytes();
    if data.len() > MAX_CLOSE_REASON {
        return Err(ErrorEnum::CloseReasonTooLong(data.len()).into());
    }
    buf.extend(&[0x88, (data.len() + 2) as u8,
                  (code >> 8) as u8, (code & 0xFF) as u8]);
    buf.extend(data);
    Ok(())
}
