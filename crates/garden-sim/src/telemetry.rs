//! Logging setup for the simulator.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,garden_sim=debug,garden_world=info";

/// Install the global subscriber. Logs go to stderr so they never interleave
/// with frames drawn on stdout.
pub fn init_telemetry(json: bool) -> Result<()> {
    // Each layer is built separately so it infers the subscriber type of its
    // own position in the stack.
    let (plain, structured) = if json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        (None, Some(fmt_layer.json()))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        (Some(fmt_layer), None)
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(plain)
        .with(structured)
        .try_init()?;

    info!(json, "Telemetry initialized");
    Ok(())
}
