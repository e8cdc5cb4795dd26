//! Tracing setup. Events go to the debug log panel's buffer once one is
//! installed, and to stderr before that.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::components::debug_log::{DebugLogWriter, global_debug_log};

pub enum LogSink {
    DebugLog(DebugLogWriter),
    Stderr(io::Stderr),
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::DebugLog(w) => w.write(buf),
            LogSink::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::DebugLog(w) => w.flush(),
            LogSink::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogSinkMaker;

impl<'a> MakeWriter<'a> for LogSinkMaker {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match global_debug_log() {
            Some(handle) => LogSink::DebugLog(handle.writer()),
            None => LogSink::Stderr(io::stderr()),
        }
    }
}

/// Install the global subscriber at `level`. Later calls are no-ops.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(LogSinkMaker)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}

pub fn init_default() {
    init(Level::DEBUG);
}
