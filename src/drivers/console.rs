use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

/// Terminal input. Events pushed with `inject` are delivered before any
/// real terminal input.
#[derive(Debug, Default)]
pub struct ConsoleInputDriver {
    event_queue: VecDeque<Event>,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&mut self, event: Event) {
        self.event_queue.push_back(event);
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.event_queue.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(evt) = self.event_queue.pop_front() {
            return Ok(evt);
        }
        crossterm::event::read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    type Backend = CrosstermBackend<Stdout>;

    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| {
                let wrapper = UiFrame::new(frame);
                f(wrapper);
            })
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn injected_events_are_read_in_order() {
        let mut d = ConsoleInputDriver::new();
        d.inject(Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
        d.inject(Event::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)));
        assert!(d.poll(Duration::from_millis(0)).unwrap());
        match d.read().unwrap() {
            Event::Key(k) => assert_eq!(k.code, KeyCode::Char('a')),
            other => panic!("expected key, got {other:?}"),
        }
        match d.read().unwrap() {
            Event::Key(k) => assert_eq!(k.code, KeyCode::Char('b')),
            other => panic!("expected key, got {other:?}"),
        }
    }
}
