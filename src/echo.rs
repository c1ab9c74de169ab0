//! JSON echo application
//!
//! Every text message is parsed as JSON and sent back wrapped into
//! `{"message": <value>, "at": "<timestamp>"}`.
use serde_json::{self, Value};
use time::{self, Tm};

use websocket::{Dispatcher, Packet, Error};


/// The dispatcher that echoes JSON messages with a timestamp
pub struct Echo {
    clock: fn() -> Tm,
}

#[derive(Serialize)]
struct Reply<'a> {
    message: &'a Value,
    at: String,
}

/// Format time as ISO 8601 UTC with milliseconds
///
/// For example: `2017-01-31T10:05:23.017Z`
pub fn iso_timestamp(tm: &Tm) -> String {
    let tm = tm.to_utc();
    format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        tm.tm_year + 1900, tm.tm_mon + 1, tm.tm_mday,
        tm.tm_hour, tm.tm_min, tm.tm_sec,
        tm.tm_nsec / 1_000_000)
}

impl Echo {
    pub fn new() -> Echo {
        Echo { clock: time::now_utc }
    }
    /// Use a custom clock, useful for tests
    pub fn with_clock(clock: fn() -> Tm) -> Echo {
        Echo { clock: clock }
    }
    /// Build the reply for a single message
    pub fn reply(&self, text: &str) -> Result<String, Error> {
        let data: Value = serde_json::from_str(text)?;
        info!("message received! {}", data);
        let reply = Reply {
            message: &data,
            at: iso_timestamp(&(self.clock)()),
        };
        Ok(serde_json::to_string(&reply)?)
    }
}

impl Dispatcher for Echo {
    fn text(&mut self, text: &str) -> Result<Option<Packet>, Error> {
        self.reply(text).map(|x| Some(Packet::Text(x)))
    }
}
