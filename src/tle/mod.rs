mod error;
mod loader;
mod parser;
mod record;

pub use error::ParseError;
pub use loader::{parse_multi_tle, TleLines};
pub use parser::parse_tle;
pub use record::{checksum, verify_checksum, TleRecord, TLE_LINE_LEN};
