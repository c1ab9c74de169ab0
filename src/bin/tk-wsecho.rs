extern crate futures;
extern crate argparse;
extern crate env_logger;
extern crate tokio_core;
extern crate tk_wsecho;
#[macro_use] extern crate log;

use std::env;
use std::panic;
use std::process;
use std::net::SocketAddr;

use argparse::{ArgumentParser, Store, StoreTrue};
use futures::{Future, Stream};
use tokio_core::reactor::Core;
use tokio_core::net::TcpListener;

use tk_wsecho::echo::Echo;
use tk_wsecho::server::{Config, Proto};
use tk_wsecho::websocket::{self, log_unmask, MAX_PAYLOAD_SIZE};


pub struct Options {
    pub listen: SocketAddr,
    pub max_payload_size: usize,
    pub trace_unmask: bool,
    pub body: String,
}

fn fatal<E: ::std::fmt::Display>(err: E) -> ! {
    error!("{} {{ FATAL: true }}", err);
    process::exit(1);
}

pub fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init().expect("init logging");
    panic::set_hook(Box::new(|info| fatal(info)));

    let mut opt = Options {
        listen: SocketAddr::from(([0, 0, 0, 0], 1337)),
        max_payload_size: MAX_PAYLOAD_SIZE,
        trace_unmask: false,
        body: String::from("hey there"),
    };
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("
            Websocket server that echoes every JSON message back with
            a timestamp
        ");
        ap.refer(&mut opt.listen)
            .add_option(&["-l", "--listen"], Store,
                "Address to listen on (default 0.0.0.0:1337)");
        ap.refer(&mut opt.max_payload_size)
            .add_option(&["--max-payload-size"], Store,
                "Largest accepted frame payload, at most 65535");
        ap.refer(&mut opt.trace_unmask)
            .add_option(&["--trace-unmask"], StoreTrue,
                "Log every unmasked byte (needs RUST_LOG=trace)");
        ap.refer(&mut opt.body)
            .add_option(&["--body"], Store,
                "Response body for plain HTTP requests");
        ap.parse_args_or_exit();
    }

    let mut wcfg = websocket::Config::new();
    wcfg.max_payload_size(opt.max_payload_size);
    if opt.trace_unmask {
        wcfg.unmask_trace(log_unmask);
    }
    let cfg = Config::new()
        .plain_body(opt.body)
        .websocket_config(&wcfg.done())
        .done();

    let mut lp = Core::new().unwrap_or_else(|e| fatal(e));
    let listener = TcpListener::bind(&opt.listen, &lp.handle())
        .unwrap_or_else(|e| fatal(e));
    info!("server listening to {}", opt.listen);

    let done = listener.incoming()
        .map_err(|e| { error!("Accept error: {}", e); })
        .map(move |(socket, addr)| {
            debug!("Accepted connection from {}", addr);
            Proto::new(socket, &cfg, Echo::new())
            .map_err(move |e| { error!("Connection {} error: {}", addr, e); })
            .then(|_| Ok(())) // don't fail, please
        })
        .buffer_unordered(200000)
          .for_each(|()| Ok(()));

    if let Err(()) = lp.run(done) {
        fatal("event loop terminated");
    }
}
