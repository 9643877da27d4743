//! Server communication.
//!
//! # Services
//!
//! - [`upload`] - multipart upload of staged files with progress reporting

pub mod upload;

pub use upload::*;
