//! Rigline Core
//!
//! This crate contains the socket-free building blocks of the rigline
//! command-link client:
//! - Remote endpoint addressing (`endpoint`)
//! - Command envelope construction and JSON serialization (`envelope`)
//! - Client configuration (`options`)
//! - Error types (`error`)

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod options;

// Optional: a small prelude to make downstream crates ergonomic.
// Keep it minimal to avoid API lock-in.
pub mod prelude {
    pub use crate::endpoint::Endpoint;
    pub use crate::envelope::{CommandEnvelope, Parameters, TestKind};
    pub use crate::error::{ClientError, Result};
    pub use crate::options::ClientOptions;
}
