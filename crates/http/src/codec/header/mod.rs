//! HTTP head encoding.
//!
//! - [`RequestHeadEncoder`]: request line and header block
//! - [`ResponseHeadEncoder`]: status line, header block and `Set-Cookie` lines
//!
//! Both enforce the framing header for the payload they precede and reject
//! heads that can't be written safely (unsupported versions, line breaks in
//! names or values) before emitting anything.

mod header_encoder;

pub use header_encoder::INIT_HEADER_SIZE;
pub use header_encoder::RequestHeadEncoder;
pub use header_encoder::ResponseHeadEncoder;
