//! Subscriber setup for binaries and tests that want to see this crate's
//! `tracing` output.
//!
//! The filter comes from `MCTEXT_LOG` (same syntax as `RUST_LOG`) and falls
//! back to `warn`.

use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "MCTEXT_LOG";

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a global subscriber. Fails if one is already installed.
pub fn init(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter());
    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
