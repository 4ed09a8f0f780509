//! Request handler module
//!
//! Routes each request to the media responder (recognized audio files,
//! range-capable) or the plain static-file responder.

pub mod media;
pub mod path;
pub mod router;
pub mod static_files;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main entry point
pub use router::{handle_request, respond, RequestContext};
