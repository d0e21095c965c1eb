//! Log panel plumbing - mirrors `tracing` output into the GUI
//!
//! `UiLog` is a shared line buffer that doubles as a `MakeWriter` for
//! `tracing-subscriber`, so log events emitted anywhere in the scan/build
//! path show up in the window's log panel. The buffer is mutex-guarded and
//! drained on the GUI thread when the panel is drawn.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Lines kept in the panel before the oldest are dropped.
const MAX_LINES: usize = 2000;

/// Shared buffer behind the log panel.
#[derive(Clone, Default)]
pub struct UiLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl UiLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the buffered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    fn push(&self, line: &str) {
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        lines.push(line.to_string());
        if lines.len() > MAX_LINES {
            let overflow = lines.len() - MAX_LINES;
            lines.drain(..overflow);
        }
    }
}

/// One formatted event's worth of output; split into lines on flush.
pub struct UiLogWriter {
    log: UiLog,
    buf: Vec<u8>,
}

impl Write for UiLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for line in String::from_utf8_lossy(&self.buf).lines() {
            if !line.is_empty() {
                self.log.push(line);
            }
        }
        self.buf.clear();
        Ok(())
    }
}

impl Drop for UiLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for UiLog {
    type Writer = UiLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        UiLogWriter {
            log: self.clone(),
            buf: Vec::new(),
        }
    }
}
