//! Logging setup

use thiserror::Error;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Error raised when the global subscriber cannot be installed
#[derive(Error, Debug)]
#[error("failed to initialize logging: {0}")]
pub struct LoggingError(String);

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `log_level`. Output goes to stderr so an
/// interactive session on stdout stays readable.
pub fn init_tracing(log_level: &str) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| LoggingError(e.to_string()))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError(e.to_string()))
}
