//! In-memory log ring buffer, the writer `tracing_sub` feeds into it, and
//! the panel that shows it.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::Component;
use crate::theme;
use crate::ui::UiFrame;

pub const DEFAULT_MAX_LINES: usize = 2000;
static GLOBAL_LOG: OnceLock<DebugLogHandle> = OnceLock::new();

/// Install `handle` as the process-wide log sink. Only the first call wins.
pub fn set_global_debug_log(handle: DebugLogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_debug_log() -> Option<DebugLogHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

#[derive(Clone, Debug)]
pub struct DebugLogHandle {
    inner: Arc<Mutex<LogBuffer>>,
}

impl DebugLogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer {
                lines: VecDeque::new(),
                max_lines: max_lines.max(1),
            })),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.lines.push_back(line.into());
            while buffer.lines.len() > buffer.max_lines {
                buffer.lines.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of up to `count` lines ending `back` lines before the newest.
    pub fn tail(&self, count: usize, back: usize) -> Vec<String> {
        let Ok(buffer) = self.inner.lock() else {
            return Vec::new();
        };
        let end = buffer.lines.len().saturating_sub(back);
        let start = end.saturating_sub(count);
        buffer.lines.range(start..end).cloned().collect()
    }

    pub fn writer(&self) -> DebugLogWriter {
        DebugLogWriter {
            handle: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// `io::Write` adapter that splits bytes into lines. A trailing partial
/// line is held until a newline or an explicit flush.
#[derive(Debug)]
pub struct DebugLogWriter {
    handle: DebugLogHandle,
    pending: Vec<u8>,
}

impl DebugLogWriter {
    fn push_complete_lines(&mut self) {
        let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return;
        };
        let drained: Vec<u8> = self.pending.drain(..=pos).collect();
        for line in String::from_utf8_lossy(&drained).split('\n') {
            if !line.is_empty() {
                self.handle.push(line);
            }
        }
    }
}

impl Write for DebugLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.push_complete_lines();
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.handle.push(rest);
        }
        Ok(())
    }
}

impl Drop for DebugLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Tail view of the log. Follows new lines until scrolled back.
#[derive(Debug)]
pub struct DebugLogComponent {
    handle: DebugLogHandle,
    back: usize,
}

impl DebugLogComponent {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self { handle, back: 0 }
    }

    pub fn following(&self) -> bool {
        self.back == 0
    }

    fn scroll(&mut self, delta: isize) {
        let max_back = self.handle.len().saturating_sub(1);
        self.back = if delta.is_negative() {
            self.back.saturating_sub(delta.unsigned_abs())
        } else {
            (self.back + delta as usize).min(max_back)
        };
    }
}

impl Component for DebugLogComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = if focused {
            Style::default()
        } else {
            theme::muted_style()
        };
        let lines = self.handle.tail(area.height as usize, self.back);
        for (row, line) in lines.iter().enumerate() {
            let text: String = line.chars().take(area.width as usize).collect();
            frame.put_str(area.x, area.y + row as u16, &text, style);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Up => self.scroll(1),
            KeyCode::Down => self.scroll(-1),
            KeyCode::PageUp => self.scroll(10),
            KeyCode::PageDown => self.scroll(-10),
            KeyCode::End => self.back = 0,
            _ => return false,
        }
        true
    }
}
