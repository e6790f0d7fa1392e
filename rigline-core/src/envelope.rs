//! Command envelope construction and JSON serialization.
//!
//! Every exchange with the rig server sends exactly one envelope: a JSON
//! object with the command name, a parameter object, and a wall-clock
//! timestamp. The server replies with free-form text that the client does
//! not interpret.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Start a test run on the rig.
pub const CMD_TEST_START: &str = "TEST_START";
/// Stop the currently running test.
pub const CMD_TEST_STOP: &str = "TEST_STOP";
/// Query the rig's current status.
pub const CMD_GET_STATUS: &str = "GET_STATUS";
/// Liveness probe.
pub const CMD_PING: &str = "PING";

/// Parameter object attached to a command.
pub type Parameters = serde_json::Map<String, Value>;

/// Kind of test the rig should run.
///
/// The wire value is an uppercase string; `Other` passes through any
/// test kind the client does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestKind {
    /// In-panel visual inspection (the rig's default test).
    #[default]
    Ipvs,
    /// Module test process.
    Mtp,
    /// Any other test kind, passed through verbatim.
    Other(String),
}

impl TestKind {
    /// Wire representation of the test kind.
    pub fn as_str(&self) -> &str {
        match self {
            TestKind::Ipvs => "IPVS",
            TestKind::Mtp => "MTP",
            TestKind::Other(s) => s,
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the parameter object for a `TEST_START` command.
///
/// Shape on the wire: `{"test_type": "IPVS", "zones": [1, 2, 3]}`.
/// Zones are opaque identifiers the client passes through uninterpreted.
pub fn test_start_parameters(kind: &TestKind, zones: &[u32]) -> Parameters {
    let mut params = Parameters::new();
    params.insert("test_type".into(), Value::String(kind.as_str().to_string()));
    params.insert(
        "zones".into(),
        Value::Array(zones.iter().map(|z| Value::from(*z)).collect()),
    );
    params
}

/// The request object sent per operation.
///
/// Constructed fresh for every call; the timestamp is captured at
/// construction time as fractional seconds since the Unix epoch.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEnvelope {
    /// Command name, e.g. `TEST_START`.
    pub command: String,
    /// Parameter object; empty when the caller supplies none.
    pub parameters: Parameters,
    /// Fractional seconds since the Unix epoch.
    pub timestamp: f64,
}

impl CommandEnvelope {
    /// Create an envelope with the current wall-clock timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use rigline_core::envelope::{CommandEnvelope, CMD_PING};
    ///
    /// let envelope = CommandEnvelope::new(CMD_PING, None);
    /// assert_eq!(envelope.command, "PING");
    /// assert!(envelope.parameters.is_empty());
    /// ```
    pub fn new(command: impl Into<String>, parameters: Option<Parameters>) -> Self {
        Self {
            command: command.into(),
            parameters: parameters.unwrap_or_default(),
            timestamp: unix_timestamp(),
        }
    }

    /// Serialize the envelope to its wire form: a UTF-8 JSON text with no
    /// trailing delimiter. Non-ASCII characters are emitted as literal
    /// UTF-8, never `\u` escapes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
