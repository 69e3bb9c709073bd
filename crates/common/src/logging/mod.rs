//! Process-wide logging for hosts embedding the ledger.
//!
//! Everything in the workspace logs through `tracing`.  This module only
//! decides where those records go.

mod manager;
mod types;


pub use manager::{build_env_filter, init, LoggingError};
pub use tracing_appender::rolling::Rotation;
pub use types::{FileLoggingConfig, LogFormat, LoggerConfig, StdoutConfig};

/// Service name qualified by a deployment label, `base%label`.
pub fn format_service_name(base: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
