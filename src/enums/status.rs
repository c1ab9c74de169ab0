use std::fmt;

use enums::Version;


/// HTTP status codes the server responds with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    SwitchingProtocols,                      // 101
    Ok,                                      // 200
    BadRequest,                              // 400
    RequestHeaderFieldsTooLarge,             // 431
}

/// Status line of a response, formats as `HTTP/1.1 200 OK`
pub struct StatusLine(pub Version, pub Status);

impl Status {
    pub fn code(&self) -> u16 {
        match *self {
            Status::SwitchingProtocols          => 101,
            Status::Ok                          => 200,
            Status::BadRequest                  => 400,
            Status::RequestHeaderFieldsTooLarge => 431,
        }
    }

    pub fn reason(&self) -> &'static str {
        match *self {
            Status::SwitchingProtocols          => "Switching Protocols",
            Status::Ok                          => "OK",
            Status::BadRequest                  => "Bad Request",
            Status::RequestHeaderFieldsTooLarge =>
                "Request Header Fields Too Large",
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.0, self.1.code(), self.1.reason())
    }
}

#[test]
fn status_line() {
    assert_eq!(StatusLine(Version::Http11, Status::SwitchingProtocols)
        .to_string(), "HTTP/1.1 101 Switching Protocols");
    assert_eq!(StatusLine(Version::Http10, Status::Ok).to_string(),
        "HTTP/1.0 200 OK");
}
