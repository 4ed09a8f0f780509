//! HTTP protocol layer module
//!
//! Range parsing, MIME classification, response builders and CORS injection.
//! Nothing here touches the filesystem.

pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use cors::apply_cors;
pub use range::{parse_range_header, ByteRange, RangeParseResult};
pub use response::{
    build_404_response, build_405_response, build_416_response, build_500_response,
    build_options_response, build_redirect_response,
};
