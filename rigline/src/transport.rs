//! Blocking TCP transport for the command client.
//!
//! The client is generic over a [`Connector`] so tests can substitute an
//! in-memory stream; [`TcpConnector`] is the real implementation. It
//! dials with a bounded connect timeout via `socket2`, then applies
//! TCP_NODELAY and the per-operation IO timeouts before handing the
//! stream over.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};

use socket2::{Domain, Protocol, Socket, Type};
use tracing::trace;

use rigline_core::endpoint::Endpoint;
use rigline_core::options::ClientOptions;

/// Seam between the client and the network.
///
/// A connector produces a fresh bidirectional byte stream per call; the
/// client owns the stream exclusively afterwards.
pub trait Connector {
    /// Stream type produced by this connector.
    type Stream: Read + Write;

    /// Open a stream to the endpoint, honoring the options' timeouts.
    fn connect(&self, endpoint: &Endpoint, options: &ClientOptions) -> io::Result<Self::Stream>;
}

/// Standard TCP connector.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, endpoint: &Endpoint, options: &ClientOptions) -> io::Result<Self::Stream> {
        let addrs = endpoint.resolve()?;
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{endpoint} resolved to no addresses"),
            ));
        }

        // Hostnames may resolve to several addresses; try each in order
        // and report the last failure.
        let mut last_err = None;
        for addr in addrs {
            trace!(%addr, "dialing");
            match dial(addr, options) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| io::Error::other("no address attempted")))
    }
}

fn dial(addr: SocketAddr, options: &ClientOptions) -> io::Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    if options.connect_timeout.is_zero() {
        socket.connect(&addr.into())?;
    } else {
        socket.connect_timeout(&addr.into(), options.connect_timeout)?;
    }
    // connect_timeout polls in non-blocking mode; every later operation
    // on this stream must block.
    socket.set_nonblocking(false)?;

    if options.nodelay {
        socket.set_nodelay(true)?;
    }

    let stream: TcpStream = socket.into();
    stream.set_read_timeout(options.io_timeout)?;
    stream.set_write_timeout(options.io_timeout)?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn test_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let endpoint = Endpoint::new("127.0.0.1", addr.port());
        let stream = TcpConnector
            .connect(&endpoint, &ClientOptions::default())
            .unwrap();

        assert!(stream.nodelay().unwrap());
        assert_eq!(
            stream.read_timeout().unwrap(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to obtain a port with no listener.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Endpoint::new("127.0.0.1", addr.port());
        let result = TcpConnector.connect(&endpoint, &ClientOptions::default());
        assert!(result.is_err());
    }
}
