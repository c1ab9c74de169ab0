use std::io;

use httparse;

use websocket;


quick_error! {
    /// HTTP server error
    #[derive(Debug)]
    pub enum Error {
        /// Socket IO error
        Io(err: io::Error) {
            description("I/O error")
            display("I/O error: {}", err)
            from()
        }
        /// Error parsing http headers
        ParseError(err: httparse::Error) {
            description("parse error")
            display("parse error: {:?}", err)
            from()
        }
        /// Error on the upgraded connection
        Websocket(err: websocket::Error) {
            description("websocket error")
            display("websocket error: {}", err)
            from()
        }
    }
}
