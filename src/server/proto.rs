use std::sync::Arc;

use futures::{Future, Poll, Async};
use tk_bufstream::IoBuf;
use tokio_io::{AsyncRead, AsyncWrite};

use websocket::Dispatcher;
use server::{Config, Error};
use server::connection::Connection;


/// A future that runs a single connection
///
/// Resolves when peer closes the connection or when the connection is
/// closed by protocol (error page, `Connection: close`, websocket close
/// frame) and everything is written.
pub struct Proto<S, D: Dispatcher> {
    io: IoBuf<S>,
    connection: Connection<D>,
}

impl<S: AsyncRead + AsyncWrite, D: Dispatcher> Proto<S, D> {
    /// Create a new protocol implementation from a TCP connection and a config
    pub fn new(conn: S, cfg: &Arc<Config>, dispatcher: D) -> Proto<S, D> {
        Proto {
            io: IoBuf::new(conn),
            connection: Connection::new(dispatcher, cfg),
        }
    }
}

impl<S: AsyncRead + AsyncWrite, D: Dispatcher> Future for Proto<S, D> {
    type Item = ();
    type Error = Error;

    fn poll(&mut self) -> Poll<(), Error> {
        loop {
            self.connection.process(&mut self.io.in_buf,
                                    &mut self.io.out_buf)?;
            self.io.flush()?;
            if self.connection.is_closing() {
                if self.io.out_buf.len() == 0 {
                    return Ok(Async::Ready(()));
                }
                return Ok(Async::NotReady);
            }
            match self.io.read()? {
                0 => {
                    // peer may half-close after sending the request,
                    // response is still flushed in this case
                    if self.io.done() && self.io.out_buf.len() == 0 {
                        return Ok(Async::Ready(()));
                    } else {
                        return Ok(Async::NotReady);
                    }
                }
                _ => continue,
            }
        }
    }
}
