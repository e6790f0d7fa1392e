//! # Rigline
//!
//! A minimal blocking TCP client for driving a remote panel-inspection
//! rig. Each operation serializes one JSON command envelope, writes it to
//! the connection, and returns whatever UTF-8 text the rig replies with.
//!
//! ## Architecture
//!
//! Rigline is structured in two layers:
//!
//! - **`rigline-core`**: socket-free building blocks (endpoint,
//!   envelope, options, errors)
//! - **`rigline`**: the blocking `CommandClient` and TCP transport
//!   (this crate)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rigline::{CommandClient, Endpoint, TestKind};
//!
//! # fn example() -> rigline::Result<()> {
//! let mut client = CommandClient::new(Endpoint::new("127.0.0.1", 7777));
//! client.connect()?;
//!
//! let pong = client.ping()?;
//! println!("rig says: {pong}");
//!
//! client.test_start(&TestKind::Ipvs, &[1, 2, 3])?;
//! client.test_stop()?;
//! client.disconnect();
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! One connection, one in-flight exchange, no framing, no retries. The
//! rig's replies are opaque text; callers interpret them. Dropping the
//! client always releases the connection.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod dev_tracing;
pub mod transport;

pub use client::CommandClient;
pub use transport::{Connector, TcpConnector};

// Re-export core types so downstream code needs only this crate.
pub use rigline_core::endpoint::Endpoint;
pub use rigline_core::envelope::{CommandEnvelope, Parameters, TestKind};
pub use rigline_core::error::{ClientError, Result};
pub use rigline_core::options::ClientOptions;
