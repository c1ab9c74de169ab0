use std::sync::Arc;

use tk_bufstream::Buf;

use websocket::{Frame, Config, Packet, Error};
use websocket::error::ErrorEnum;
use websocket::zero_copy::{Opcode, parse_frame, write_packet, write_close};


/// Dispatches messages received from websocket
pub trait Dispatcher {
    /// A text message received
    ///
    /// Returned packet, if any, is written to the connection before the next
    /// frame is decoded.
    fn text(&mut self, text: &str) -> Result<Option<Packet>, Error>;
}

/// This is a helper for running websockets
///
/// The loop doesn't own a socket. It decodes every complete frame in the
/// input buffer, calls the dispatcher for text messages and puts replies
/// into the output buffer. Pings are answered by the loop itself.
pub struct Loop<D: Dispatcher> {
    config: Arc<Config>,
    dispatcher: D,
    state: LoopState,
}

/// Close code sent in reply to the peer's close frame
///
/// Codes that must never appear on the wire are replaced by 1002
/// (protocol error). 1005 means the peer sent no code at all.
fn reply_code(code: u16) -> u16 {
    match code {
        1005 => 1000,
        1000...1003 | 1007...1014 | 3000...4999 => code,
        _ => 1002,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Open,
    /// Close frame is received and replied, nothing is read after it
    Closed,
}

impl<D: Dispatcher> Loop<D> {
    /// Create a new websocket Loop
    pub fn new(dispatcher: D, config: &Arc<Config>) -> Loop<D> {
        Loop {
            config: config.clone(),
            dispatcher: dispatcher,
            state: LoopState::Open,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Process all complete frames from the input buffer
    ///
    /// Incomplete frame is left in the buffer until more data arrives.
    pub fn process(&mut self, input: &mut Buf, output: &mut Buf)
        -> Result<LoopState, Error>
    {
        while self.state == LoopState::Open {
            let nbytes = match parse_frame(&mut input[..], &self.config)? {
                Some((frame, nbytes)) => {
                    match frame {
                        Frame::Text(text) => {
                            if let Some(pkt) = self.dispatcher.text(text)? {
                                pkt.encode(output)?;
                            }
                        }
                        Frame::Ping(data) => {
                            trace!("Received ping {:?}", data);
                            write_packet(output, Opcode::Pong, data)?;
                        }
                        Frame::Pong(data) => {
                            trace!("Received pong {:?}", data);
                        }
                        Frame::Close(code, reason) => {
                            debug!("Websocket closed by peer [{}]{:?}",
                                code, reason);
                            write_close(output, reply_code(code), "")?;
                            self.state = LoopState::Closed;
                        }
                        frame @ Frame::Binary(_) |
                        frame @ Frame::Continuation(_) => {
                            return Err(ErrorEnum::UnsupportedFrame(
                                frame.opcode().code()).into());
                        }
                    }
                    nbytes
                }
                None => break,
            };
            input.consume(nbytes);
        }
        Ok(self.state)
    }
}
