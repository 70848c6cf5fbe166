//! Range-aware byte delivery.
//!
//! [`range`] turns a raw `Range` header into a validated byte window;
//! [`file_stream`] turns a resolved file plus a window into an HTTP
//! response whose body streams bounded chunks from disk.

pub mod file_stream;
pub mod range;

pub use file_stream::serve_file;
pub use range::{RangeError, RequestedRange, parse_range};
