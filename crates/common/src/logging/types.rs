use std::path::PathBuf;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;

/// Line format of a log sink.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Stdout sink.
#[derive(Clone, Debug)]
pub struct StdoutConfig {
    pub format: LogFormat,

    /// Span lifecycle events to report, none by default.
    pub span_events: FmtSpan,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            span_events: FmtSpan::NONE,
        }
    }
}

/// Rolling file sink.  Files are named `<prefix>.<date>`.
#[derive(Clone, Debug)]
pub struct FileLoggingConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub rotation: Rotation,
    pub format: LogFormat,
}

impl FileLoggingConfig {
    /// Daily-rotated compact logs under `directory`.
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            rotation: Rotation::DAILY,
            format: LogFormat::Compact,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Logging setup for a process hosting a ledger.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Reported once logging is up.
    pub service_name: String,

    /// Filter used when `RUST_LOG` is unset.
    pub default_directive: String,

    pub stdout: StdoutConfig,

    pub file: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            default_directive: "info".to_owned(),
            stdout: StdoutConfig::default(),
            file: None,
        }
    }

    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    pub fn with_stdout_format(mut self, format: LogFormat) -> Self {
        self.stdout.format = format;
        self
    }

    pub fn with_file_logging(mut self, file: FileLoggingConfig) -> Self {
        self.file = Some(file);
        self
    }
}
