//! Opt-in tracing bootstrap for tests and ad-hoc debugging.

/// Initialize a fmt subscriber from `RUST_LOG`, if it is set.
///
/// Best-effort: does nothing when `RUST_LOG` is absent or when a global
/// subscriber is already installed, so tests can call it freely.
pub fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}
