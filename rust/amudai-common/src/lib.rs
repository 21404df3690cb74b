//! Core definitions (error vocabulary and verification helpers), relied upon by all amudai-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
