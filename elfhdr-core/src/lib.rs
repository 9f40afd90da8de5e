pub mod binary;
pub mod codes;
pub mod decode;
pub mod error;
pub mod extract;
pub mod flags;
pub mod header;
pub mod layout;

pub use binary::*;
pub use codes::*;
pub use decode::*;
pub use error::*;
pub use flags::*;
pub use header::*;
pub use layout::{ByteOrder, Width};
