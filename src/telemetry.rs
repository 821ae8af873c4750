//! Opt-in log output for binaries embedding the renderer.
//!
//! The library only emits `tracing` events. Hosts that already own a
//! subscriber should skip this module.

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back
/// to `default_filter`. Stdout stays free for SVG output.
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// is already installed.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing("info")
}
