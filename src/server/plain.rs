use std::io::{self, Write};

use tk_bufstream::Buf;

use enums::StatusLine;
use {Version, Status};

const PART1: &'static str = "\
    <!DOCTYPE html>
    <html>\
        <head>\
            <title>\
    ";
const PART2: &'static str = "\
            </title>\
        </head>\
        <body>\
            <h1>\
    ";
const PART3: &'static str = concat!("\
            </h1>\
            <hr>\
            <p>Yours faithfully,<br>\
                tk-wsecho/", env!("CARGO_PKG_VERSION"), "\
            </p>
        </body>
    </html>
    ");

#[cfg(feature="date_header")]
fn write_date(buf: &mut Buf) -> Result<(), io::Error> {
    use httpdate::HttpDate;
    use std::time::SystemTime;
    write!(buf, "Date: {}\r\n", HttpDate::from(SystemTime::now()))
}

#[cfg(not(feature="date_header"))]
fn write_date(_buf: &mut Buf) -> Result<(), io::Error> {
    Ok(())
}

/// Writes the canned response for any request that isn't an upgrade
///
/// Content length is derived from the body. `Connection: close` is added
/// when `close` is set.
pub fn write_plain(buf: &mut Buf, version: Version, body: &str, close: bool)
    -> Result<(), io::Error>
{
    write!(buf, "{}\r\n", StatusLine(version, Status::Ok))?;
    write!(buf, "Content-Length: {}\r\n", body.as_bytes().len())?;
    write_date(buf)?;
    if close {
        buf.extend(b"Connection: close\r\n");
    }
    buf.extend(b"\r\n");
    buf.extend(body.as_bytes());
    Ok(())
}

/// Generates response with default error page
///
/// Connection is always closed after the error page.
pub fn write_error_page(buf: &mut Buf, status: Status)
    -> Result<(), io::Error>
{
    let code = status.code();
    let reason = status.reason();
    let content_length = PART1.len() + PART2.len() + PART3.len() +
        2*(4 + reason.as_bytes().len());
    write!(buf, "{}\r\n", StatusLine(Version::Http11, status))?;
    write!(buf, "Content-Length: {}\r\n", content_length)?;
    buf.extend(b"Content-Type: text/html\r\n");
    write_date(buf)?;
    buf.extend(b"Connection: close\r\n\r\n");
    write!(buf, "\
        {p1}{code:03} {status}{p2}{code:03} {status}{p3}",
            code=code, status=reason,
            p1=PART1, p2=PART2, p3=PART3)
}
