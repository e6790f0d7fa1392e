//! Client configuration options
//!
//! This module provides the configuration knobs for the command client:
//! timeouts, receive buffer size, and TCP tuning. There is no process-wide
//! configuration; options travel with the client instance.

use std::time::Duration;

/// Client configuration options.
///
/// # Examples
///
/// ```
/// use rigline_core::options::ClientOptions;
/// use std::time::Duration;
///
/// let opts = ClientOptions::default()
///     .with_connect_timeout(Duration::from_secs(5))
///     .with_io_timeout(Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Maximum time to wait for the TCP connection to complete.
    ///
    /// - Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout applied to each send and receive operation.
    ///
    /// - `None`: Block indefinitely
    /// - `Some(duration)`: Fail the exchange after `duration`
    /// - Default: 5 seconds, matching the connect bound
    pub io_timeout: Option<Duration>,

    /// Receive buffer size (bytes).
    ///
    /// A response is read with a single receive of up to this many
    /// bytes; the client performs no reassembly of larger replies.
    /// - Default: 4096
    pub recv_buffer_size: usize,

    /// Enable TCP_NODELAY on the connection.
    ///
    /// Each exchange is a small request followed by a wait for the
    /// reply, so Nagle buffering only adds latency.
    /// - Default: true
    pub nodelay: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            io_timeout: Some(Duration::from_secs(5)),
            recv_buffer_size: 4096,
            nodelay: true,
        }
    }
}

impl ClientOptions {
    /// Create new client options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-operation send/receive timeout.
    pub fn with_io_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Set the receive buffer size.
    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size;
        self
    }

    /// Enable or disable TCP_NODELAY.
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }
}
