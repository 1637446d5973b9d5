//! The per-command log file and the layer that appends events to it.
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, LineWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::subscriber::{STAGE_TARGET, message_of};

/// Directory under the cache root holding one log per subcommand.
const LOG_DIR: &str = "obmc-tools";

/// `$XDG_CACHE_HOME`, else `$HOME/.cache`, else `./.cache`.
fn cache_root(var: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    if let Some(xdg) = var("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    var("HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".cache")
}

/// Where `obmc <command>` writes its log.
pub(super) fn log_file_path(command: &str) -> PathBuf {
    cache_root(|k| std::env::var_os(k))
        .join(LOG_DIR)
        .join(format!("{command}.log"))
}

/// Appends every event, DEBUG included, as one timestamped line.
///
/// The file is truncated when the layer is created, so it only ever holds
/// the latest run of a command.
#[derive(Debug)]
pub(super) struct FileLayer {
    out: Mutex<LineWriter<File>>,
}

impl FileLayer {
    /// Create `path` (and its directory) and write the run header.
    pub(super) fn create(path: &Path, command: &str) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut out = LineWriter::new(File::create(path)?);
        writeln!(
            out,
            "# obmc {command} {} started {}",
            crate::commands::version::version(),
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        )?;
        Ok(Self {
            out: Mutex::new(out),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let meta = event.metadata();
        let label = if meta.target() == STAGE_TARGET {
            "STAGE"
        } else {
            meta.level().as_str()
        };
        let time = chrono::Utc::now().format("%H:%M:%S%.3f");
        if let Ok(mut out) = self.out.lock() {
            writeln!(out, "{time} {label:<5} {}", message_of(event)).ok();
        }
    }
}
