//! Wire protocol definitions: constants and the header envelope.

pub mod constants;
pub mod header;

pub use constants::{HeaderVersion, HEADER_SIGNATURE};
pub use header::Header;
