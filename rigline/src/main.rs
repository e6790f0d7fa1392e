//! Reference driver for the rigline client.
//!
//! Connects to the default rig endpoint and walks through a scripted
//! sequence: PING, GET_STATUS, an IPVS test run over zones 1-3, a stop
//! after two seconds, then an MTP run over zones 1-2. Per-command
//! failures are logged and the script continues; Ctrl-C stops the script
//! between steps. The connection is released on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rigline::{ClientError, CommandClient, Endpoint, TestKind};

const DEFAULT_ENDPOINT: (&str, u16) = ("127.0.0.1", 7777);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::SeqCst);
        }) {
            warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    info!("rigline driver starting");

    let mut client = CommandClient::new(Endpoint::new(DEFAULT_ENDPOINT.0, DEFAULT_ENDPOINT.1));
    if let Err(e) = run(&mut client, &interrupted) {
        error!(error = %e, "driver aborted");
    }
    if interrupted.load(Ordering::SeqCst) {
        info!("interrupted by user");
    }

    // Dropping the client would release the connection too; disconnect
    // explicitly so the shutdown is visible in the log.
    client.disconnect();
    info!("rigline driver finished");
}

/// Scripted command sequence.
///
/// A failed PING aborts the script (the rig is not answering); later
/// commands only log their failures, matching an operator poking a rig
/// that may refuse mid-run commands.
fn run(client: &mut CommandClient, interrupted: &AtomicBool) -> Result<(), ClientError> {
    client.connect()?;

    client.ping()?;
    info!("rig server is alive");

    if interrupted.load(Ordering::SeqCst) {
        return Ok(());
    }
    let _ = client.get_status();

    if interrupted.load(Ordering::SeqCst) {
        return Ok(());
    }
    let _ = client.test_start(&TestKind::Ipvs, &[1, 2, 3]);

    // Give the rig time to spin up before stopping the run.
    thread::sleep(Duration::from_secs(2));

    if interrupted.load(Ordering::SeqCst) {
        return Ok(());
    }
    let _ = client.test_stop();

    if interrupted.load(Ordering::SeqCst) {
        return Ok(());
    }
    let _ = client.test_start(&TestKind::Mtp, &[1, 2]);

    Ok(())
}
