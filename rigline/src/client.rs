//! The blocking command client.
//!
//! `CommandClient` owns one TCP connection to the rig server and performs
//! strictly sequential request/reply exchanges over it: build a
//! [`CommandEnvelope`], serialize, one write, one bounded read, decode.
//! There is no retry, no queueing, and no framing; the rig is expected to
//! answer each request with a single reply of at most the configured
//! buffer size.
//!
//! # State Machine
//!
//! ```text
//! Disconnected → connect() → Connected → disconnect() → Disconnected
//! ```
//!
//! `send_command` is only valid while connected and fails with
//! [`ClientError::NotConnected`] otherwise, without touching the network.
//! A failed exchange leaves the connection in place; only `connect`,
//! `disconnect`, and `Drop` change connection state.

use std::io::{Read, Write};

use tracing::{debug, info, warn};

use rigline_core::endpoint::Endpoint;
use rigline_core::envelope::{
    test_start_parameters, CommandEnvelope, Parameters, TestKind, CMD_GET_STATUS, CMD_PING,
    CMD_TEST_START, CMD_TEST_STOP,
};
use rigline_core::error::{ClientError, Result};
use rigline_core::options::ClientOptions;

use crate::transport::{Connector, TcpConnector};

/// Blocking command client for the rig server.
///
/// Generic over a [`Connector`] so tests can exchange against an
/// in-memory stream; production code uses the [`TcpConnector`] default.
///
/// # Example
///
/// ```rust,no_run
/// use rigline::{CommandClient, Endpoint};
///
/// # fn example() -> rigline::Result<()> {
/// let mut client = CommandClient::new(Endpoint::new("127.0.0.1", 7777));
/// client.connect()?;
/// let reply = client.ping()?;
/// # Ok(())
/// # }
/// ```
pub struct CommandClient<C: Connector = TcpConnector> {
    endpoint: Endpoint,
    options: ClientOptions,
    connector: C,
    stream: Option<C::Stream>,
}

impl CommandClient<TcpConnector> {
    /// Create a client for the given endpoint with default options.
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_options(endpoint, ClientOptions::default())
    }

    /// Create a client with explicit options.
    pub fn with_options(endpoint: Endpoint, options: ClientOptions) -> Self {
        Self::with_connector(endpoint, options, TcpConnector)
    }
}

impl<C: Connector> CommandClient<C> {
    /// Create a client with a custom connector.
    pub fn with_connector(endpoint: Endpoint, options: ClientOptions, connector: C) -> Self {
        Self {
            endpoint,
            options,
            connector,
            stream: None,
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the connection, waiting up to the configured connect timeout.
    ///
    /// On failure the client stays disconnected and the error names the
    /// endpoint. Calling `connect` while already connected drops the
    /// prior connection and dials a fresh one.
    pub fn connect(&mut self) -> Result<()> {
        if self.stream.take().is_some() {
            debug!(endpoint = %self.endpoint, "replacing existing connection");
        }

        info!(endpoint = %self.endpoint, "connecting to rig server");
        match self.connector.connect(&self.endpoint, &self.options) {
            Ok(stream) => {
                self.stream = Some(stream);
                info!(endpoint = %self.endpoint, "connected");
                Ok(())
            }
            Err(source) => {
                warn!(endpoint = %self.endpoint, error = %source, "connection failed");
                Err(ClientError::Connect {
                    endpoint: self.endpoint.to_string(),
                    source,
                })
            }
        }
    }

    /// Close the connection if one is open. Idempotent; a second call is
    /// a no-op and closes nothing.
    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            info!(endpoint = %self.endpoint, "disconnected from rig server");
        }
    }

    /// Send a named command with optional parameters and return the rig's
    /// raw reply text.
    ///
    /// One envelope is written in a single send and the reply is taken
    /// from a single read of up to `recv_buffer_size` bytes. Any failure
    /// (not connected, encode, send, receive, decode) is logged here and
    /// returned as `Err`; a mid-exchange failure does **not** close the
    /// connection.
    pub fn send_command(&mut self, command: &str, parameters: Option<Parameters>) -> Result<String> {
        match self.exchange(command, parameters) {
            Ok(response) => Ok(response),
            Err(err) => {
                warn!(command, error = %err, "command failed");
                Err(err)
            }
        }
    }

    fn exchange(&mut self, command: &str, parameters: Option<Parameters>) -> Result<String> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;

        let envelope = CommandEnvelope::new(command, parameters);
        let message = envelope.to_json()?;

        if envelope.parameters.is_empty() {
            debug!(command = %envelope.command, "sending command");
        } else {
            debug!(
                command = %envelope.command,
                parameters = ?envelope.parameters,
                "sending command"
            );
        }
        stream.write_all(message.as_bytes())?;

        let mut buf = vec![0u8; self.options.recv_buffer_size];
        let n = stream.read(&mut buf)?;
        buf.truncate(n);
        // A zero-byte read (peer EOF) decodes to the empty string, which
        // is a valid reply here, not an absence.
        let response = String::from_utf8(buf)?;

        debug!(command = %envelope.command, %response, "received reply");
        Ok(response)
    }

    /// Start a test run: `TEST_START` with `{test_type, zones}`.
    ///
    /// `TestKind::default()` is IPVS and an empty zone list means "all
    /// zones", both decided by the rig.
    pub fn test_start(&mut self, kind: &TestKind, zones: &[u32]) -> Result<String> {
        let params = test_start_parameters(kind, zones);
        self.send_command(CMD_TEST_START, Some(params))
    }

    /// Stop the running test: `TEST_STOP`, no parameters.
    pub fn test_stop(&mut self) -> Result<String> {
        self.send_command(CMD_TEST_STOP, None)
    }

    /// Query rig status: `GET_STATUS`, no parameters.
    pub fn get_status(&mut self) -> Result<String> {
        self.send_command(CMD_GET_STATUS, None)
    }

    /// Liveness probe: `PING`, no parameters.
    pub fn ping(&mut self) -> Result<String> {
        self.send_command(CMD_PING, None)
    }
}

// However the owner exits, the connection is released exactly once.
impl<C: Connector> Drop for CommandClient<C> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
