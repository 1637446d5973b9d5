//! Console and file logging on top of `tracing`.
//!
//! [`init_subscriber`] installs the process-wide subscriber once per run and
//! reports where the log file went; [`Logger`] is the handle command code
//! holds, and library code logs through `&dyn` [`Log`].

mod file;
mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{LOG_ENV, init_subscriber};
pub use types::Log;

#[cfg(test)]
pub(crate) use types::test_helpers;

/// A [`Logger`] whose events reach a temp log file through a thread-local
/// dispatcher. Keep the guard alive for the whole test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("test.log");
    let layer = file::FileLayer::create(&path, "test").expect("create log file");
    let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (Logger::new(Some(path)), tmp, guard)
}
