use std::fmt;
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;

use log::warn;

use crate::pool::sync::lock;

/// Serializes whole lines from all workers onto one writer.
///
/// This lock is independent of the pool lock and never taken while holding it.
pub(crate) struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl OutputSink {
    pub(crate) fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub(crate) fn stdout() -> Self {
        Self::new(Box::new(BufWriter::new(io::stdout())))
    }

    pub(crate) fn emit(&self, line: impl fmt::Display) {
        let mut writer = lock(&self.writer, "output");
        if let Err(err) = writeln!(writer, "{}", line) {
            warn!("Failed to write output line: {}", err);
        }
    }

    pub(crate) fn flush(&self) {
        let mut writer = lock(&self.writer, "output");
        if let Err(err) = writer.flush() {
            warn!("Failed to flush output: {}", err);
        }
    }
}
