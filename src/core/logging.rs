// Logging
// Writes "<timestamp> - <LEVEL> - <message>" lines to the log file and stdout

use anyhow::{Context, Result};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::Layer as _;

use super::app_config::LoggingSettings;

/// Event formatter producing one plain line per event
#[derive(Debug, Clone)]
pub struct LineFormat {
    timestamp_format: String,
}

impl LineFormat {
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(&self.timestamp_format),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Keeps the background log file writer alive; drop it last to flush
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Install the global subscriber: log file (append) plus optional stdout
pub fn init(logfile: &Path, settings: &LoggingSettings, verbose: bool) -> Result<LogGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logfile)
        .with_context(|| format!("Failed to open log file: {}", logfile.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat::new(settings.timestamp_format.clone()))
        .with_writer(non_blocking)
        .with_filter(level);

    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat::new(settings.timestamp_format.clone()))
            .with_writer(std::io::stdout)
            .with_filter(level)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install logger")?;

    Ok(LogGuard { _guard: guard })
}
