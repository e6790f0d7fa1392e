//! End-to-end exchanges against a real TCP server.
//!
//! A canned rig server runs on a loopback socket in a background thread
//! and answers each JSON envelope with a fixed reply per command.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;

use rigline::{ClientError, CommandClient, Endpoint, TestKind};

/// Canned rig server: accepts one connection, answers every envelope.
/// Returns the listening port and a log of received envelopes.
fn spawn_rig_server() -> (u16, Arc<Mutex<Vec<Value>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            let envelope: Value = match serde_json::from_slice(&buf[..n]) {
                Ok(v) => v,
                Err(_) => break,
            };
            let reply = match envelope["command"].as_str() {
                Some("PING") => "PONG".to_string(),
                Some("GET_STATUS") => r#"{"state": "IDLE", "progress": 0}"#.to_string(),
                Some("TEST_START") => format!(
                    "STARTED {}",
                    envelope["parameters"]["test_type"].as_str().unwrap_or("?")
                ),
                Some("TEST_STOP") => "STOPPED".to_string(),
                _ => "UNKNOWN COMMAND".to_string(),
            };
            log.lock().unwrap().push(envelope);
            if stream.write_all(reply.as_bytes()).is_err() {
                break;
            }
        }
    });

    (port, received)
}

#[test]
fn test_end_to_end_scenario() {
    rigline::dev_tracing::init_tracing();
    let (port, _received) = spawn_rig_server();

    let mut client = CommandClient::new(Endpoint::new("127.0.0.1", port));
    client.connect().unwrap();
    assert!(client.is_connected());

    let pong = client.ping().unwrap();
    assert_eq!(pong, "PONG");

    let status = client.get_status().unwrap();
    assert!(status.contains("IDLE"));

    client.disconnect();
    assert!(!client.is_connected());

    // After disconnect every send short-circuits to the absence value.
    let result = client.send_command("PING", None);
    assert!(matches!(result, Err(ClientError::NotConnected)));
}

#[test]
fn test_test_run_sequence_over_wire() {
    let (port, received) = spawn_rig_server();

    let mut client = CommandClient::new(Endpoint::new("127.0.0.1", port));
    client.connect().unwrap();

    let started = client.test_start(&TestKind::Ipvs, &[1, 2, 3]).unwrap();
    assert_eq!(started, "STARTED IPVS");

    let stopped = client.test_stop().unwrap();
    assert_eq!(stopped, "STOPPED");

    let started = client.test_start(&TestKind::Mtp, &[1, 2]).unwrap();
    assert_eq!(started, "STARTED MTP");

    client.disconnect();

    let log = received.lock().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0]["command"], "TEST_START");
    assert_eq!(
        log[0]["parameters"],
        serde_json::json!({"test_type": "IPVS", "zones": [1, 2, 3]})
    );
    assert_eq!(log[1]["command"], "TEST_STOP");
    assert_eq!(log[1]["parameters"], serde_json::json!({}));
    assert_eq!(
        log[2]["parameters"],
        serde_json::json!({"test_type": "MTP", "zones": [1, 2]})
    );
    // Timestamps are fractional epoch seconds and move forward.
    assert!(log[0]["timestamp"].as_f64().unwrap() <= log[2]["timestamp"].as_f64().unwrap());
}

#[test]
fn test_connect_refused_reports_endpoint() {
    // Bind then drop to obtain a port with no listener behind it.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut client = CommandClient::new(Endpoint::new("127.0.0.1", port));
    let err = client.connect().unwrap_err();

    assert!(matches!(err, ClientError::Connect { .. }));
    assert!(err.to_string().contains(&format!("127.0.0.1:{port}")));
    assert!(!client.is_connected());
}
