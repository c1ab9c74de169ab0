mod status;
mod version;

pub use self::status::{Status, StatusLine};
pub use self::version::Version;
