//! Websocket upgrade server based on `tokio` tools
//!
//! The crate accepts plain HTTP connections, upgrades them to websockets
//! and runs a frame dispatcher on the upgraded connection. The bundled
//! dispatcher (`echo::Echo`) answers every JSON text message with the same
//! value and a timestamp.
#![recursion_limit="100"]

extern crate futures;
extern crate httparse;
extern crate tokio_io;
extern crate tk_bufstream;
extern crate byteorder;
extern crate sha1;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate time;
#[macro_use] extern crate serde_derive;
#[macro_use(quick_error)] extern crate quick_error;
#[macro_use] extern crate matches;
#[macro_use] extern crate log;
#[cfg(feature="date_header")] extern crate httpdate;

pub mod server;
pub mod websocket;
pub mod echo;
mod enums;

pub use enums::{Version, Status};
