//! Console formatting and global subscriber installation.
use std::io::IsTerminal as _;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;

use super::file::{FileLayer, log_file_path};

/// Target that marks an INFO event as a stage header.
pub(super) const STAGE_TARGET: &str = "obmc::stage";

/// Environment variable overriding the console filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "OBMC_LOG";

/// The `message` field of `event`, formatted.
pub(super) fn message_of(event: &tracing::Event<'_>) -> String {
    struct Message(String);

    impl tracing::field::Visit for Message {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                value.clone_into(&mut self.0);
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    let mut message = Message(String::new());
    event.record(&mut message);
    message.0
}

/// Console output for one `obmc <command>` run.
///
/// Stage headers and problems name the command; colour is only emitted when
/// the writer is a terminal.
struct ConsoleFormat {
    command: String,
}

impl ConsoleFormat {
    fn paint(writer: &Writer<'_>, code: &str, text: &str) -> String {
        if writer.has_ansi_escapes() {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let msg = message_of(event);
        let command = &self.command;

        let line = match *meta.level() {
            tracing::Level::ERROR => {
                format!("{command}: {} {msg}", Self::paint(&writer, "31", "error:"))
            }
            tracing::Level::WARN => {
                format!("{command}: {} {msg}", Self::paint(&writer, "33", "warning:"))
            }
            tracing::Level::INFO if meta.target() == STAGE_TARGET => format!(
                "{} {}",
                Self::paint(&writer, "1;34", &format!("[{command}]")),
                Self::paint(&writer, "1", &msg)
            ),
            tracing::Level::INFO => format!("  {msg}"),
            _ => format!("  {}", Self::paint(&writer, "2", &msg)),
        };
        writeln!(writer, "{line}")
    }
}

/// Install the global subscriber for `obmc <command>`.
///
/// The console shows INFO and above (DEBUG with `verbose`), unless
/// [`LOG_ENV`] holds a filter; warnings and errors go to stderr. Every event
/// at DEBUG and above is also appended to the command's log file.
///
/// Returns the log file path, or `None` if it could not be created (the run
/// then logs to the console only). Call once, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer()
        .event_format(ConsoleFormat {
            command: command.to_string(),
        })
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(
            std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .or_else(std::io::stdout),
        )
        .with_filter(console_filter);

    let path = log_file_path(command);
    let file = FileLayer::create(&path, command).ok();
    let opened = file.is_some().then_some(path);

    tracing_subscriber::registry()
        .with(console)
        .with(file.map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
    opened
}
