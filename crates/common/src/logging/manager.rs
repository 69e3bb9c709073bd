use std::{env, io};

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::ParseError,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::{LogFormat, LoggerConfig};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid filter directive: {0}")]
    Directive(#[from] ParseError),

    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Env filter honoring `RUST_LOG`, falling back to `default_directive`.
///
/// The default may list several comma-separated directives.  It is checked
/// even when `RUST_LOG` overrides it.
pub fn build_env_filter(default_directive: &str) -> Result<EnvFilter, LoggingError> {
    let fallback = EnvFilter::builder().parse(default_directive)?;
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => {
            Ok(EnvFilter::builder().parse_lossy(from_env))
        }
        _ => Ok(fallback),
    }
}

/// Installs the global subscriber: a stdout sink plus the file sink if one
/// is configured.
///
/// Can only succeed once per process.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(&config.default_directive)?;

    let stdout = sink_layer(
        config.stdout.format,
        io::stdout,
        true,
        config.stdout.span_events.clone(),
        filter.clone(),
    );

    let file = config.file.as_ref().map(|file| {
        let appender = RollingFileAppender::new(file.rotation.clone(), &file.directory, &file.prefix);
        sink_layer(file.format, appender, false, FmtSpan::NONE, filter.clone())
    });

    tracing_subscriber::registry()
        .with(stdout)
        .with(file)
        .try_init()?;

    info!(service = %config.service_name, "logging initialized");
    Ok(())
}

fn sink_layer<S, W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
    span_events: FmtSpan,
    filter: EnvFilter,
) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_span_events(span_events);

    match format {
        LogFormat::Compact => base.compact().with_filter(filter).boxed(),
        LogFormat::Json => base.json().with_filter(filter).boxed(),
    }
}
