//! Logging setup for the Property Finder backend
//!
//! Offers the choice between JSON logging using Bunyan format or
//! human-readable text logging, auto-detected based on whether the
//! output is a TTY (JSON if non-TTY, Text if TTY).

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Initialize the tracing subscriber with the specified format
pub fn initialize_logging(log_format: LogFormat) {
    let env_filter = EnvFilter::from_default_env();

    match log_format.resolve() {
        LogFormat::Json => {
            // Machine-readable JSON logging using Bunyan format
            tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(
                    "property-finder-backend".to_string(),
                    std::io::stdout,
                ))
                .init();
        }
        LogFormat::Text | LogFormat::Auto => {
            // Human-readable text logging; Auto has been resolved above
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
