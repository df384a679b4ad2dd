//! Logging Infrastructure
//!
//! Console logging for binaries built on this crate. `RUST_LOG` overrides
//! the level passed in.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "alloc_client=trace")
/// * `json_format` - JSON lines instead of human-readable output
///
/// # Examples
/// ```no_run
/// alloc_client::logger::init_logger("info", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init()?;
    }

    Ok(())
}
