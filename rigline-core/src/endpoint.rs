//! Endpoint abstraction for addressing the remote rig server.
//!
//! Provides a host/port pair with parsing and resolution support.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Remote endpoint address.
///
/// Immutable after construction; the client holds one endpoint for its
/// whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from a host and port.
    ///
    /// # Examples
    ///
    /// ```
    /// use rigline_core::endpoint::Endpoint;
    ///
    /// let endpoint = Endpoint::new("127.0.0.1", 7777);
    /// assert_eq!(endpoint.to_string(), "127.0.0.1:7777");
    /// ```
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse an endpoint from a string.
    ///
    /// Supported formats:
    /// - `127.0.0.1:7777`
    /// - `rig.local:7777` (resolved at connect time)
    /// - `[::1]:7777` (IPv6)
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        s.parse()
    }

    /// Host part of the endpoint.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part of the endpoint.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve the endpoint to socket addresses.
    ///
    /// Hostnames may resolve to more than one address; the dialer tries
    /// them in order.
    pub fn resolve(&self) -> io::Result<Vec<SocketAddr>> {
        let addrs = (self.host.as_str(), self.port).to_socket_addrs()?;
        Ok(addrs.collect())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Bracketed IPv6 first, so the colons inside the address do not
        // confuse the host/port split.
        if let Some(rest) = s.strip_prefix('[') {
            let (host, port) = rest
                .split_once("]:")
                .ok_or_else(|| EndpointError::InvalidFormat(s.to_string()))?;
            if host.is_empty() {
                return Err(EndpointError::InvalidFormat(s.to_string()));
            }
            let port = port
                .parse::<u16>()
                .map_err(|_| EndpointError::InvalidPort(port.to_string()))?;
            return Ok(Endpoint::new(host, port));
        }

        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::InvalidFormat(s.to_string()))?;
        if host.is_empty() {
            return Err(EndpointError::InvalidFormat(s.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| EndpointError::InvalidPort(port.to_string()))?;
        Ok(Endpoint::new(host, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Errors that can occur when parsing or resolving endpoints.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("Invalid endpoint: {0} (expected host:port)")]
    InvalidFormat(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
