use anyhow::Context;
use crate::shared::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "dvm=debug"
    } else {
        "warn"
    }
}

/// Initialize diagnostic logging for the dvm CLI
///
/// Logs go to stderr so they never mix with command output on stdout.
/// The level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=debug dvm list   (everything, including HTTP and cache traces)
/// - RUST_LOG=dvm=info dvm upgrade
///
/// Without RUST_LOG only warnings are shown, or debug output of dvm itself
/// with `--verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
