//! A writer that fans every write out to several owned sinks.
use std::io::{self, Write};

/// Forwards each write to an ordered list of sinks.
///
/// Every sink receives the whole buffer, in list order. The first sink
/// error aborts the write and is returned; later sinks are not attempted.
#[derive(Default)]
pub struct Tee {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Tee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tee")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Tee {
    /// Create a tee with no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sink` to the end of the list.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
