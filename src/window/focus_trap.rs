use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::listeners::{GlobalListeners, ListenerKind, ListenerScope};

use super::chrome::ChromeButton;
use super::config::WindowOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Content,
    Button(ChromeButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapAction {
    /// Escape: the window asks to be closed.
    Close,
    /// Enter or space on a focused control.
    Activate(ChromeButton),
    /// Focus moved within the window.
    Moved(FocusTarget),
    /// Not handled by the trap; the content may use it.
    Ignored,
}

/// Keyboard focus cycle for an open, non-minimized window.
///
/// Tab and Shift+Tab wrap around inside the window instead of leaving it.
/// The trap owns a `KeyDown` registration for as long as it exists.
#[derive(Debug)]
pub struct FocusTrap {
    targets: Vec<FocusTarget>,
    index: usize,
    _scope: ListenerScope,
}

impl FocusTrap {
    pub fn new(owner: &str, options: &WindowOptions, listeners: &GlobalListeners) -> Self {
        let mut targets = vec![FocusTarget::Content];
        if options.show_minimize {
            targets.push(FocusTarget::Button(ChromeButton::Minimize));
        }
        if options.show_maximize {
            targets.push(FocusTarget::Button(ChromeButton::Maximize));
        }
        targets.push(FocusTarget::Button(ChromeButton::Close));
        Self {
            targets,
            index: 0,
            _scope: listeners.acquire(owner, &[ListenerKind::KeyDown]),
        }
    }

    pub fn focused(&self) -> FocusTarget {
        self.targets[self.index]
    }

    fn step(&mut self, forward: bool) -> FocusTarget {
        let len = self.targets.len();
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
        self.focused()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> TrapAction {
        if key.kind == KeyEventKind::Release {
            return TrapAction::Ignored;
        }
        match key.code {
            KeyCode::Esc => TrapAction::Close,
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                TrapAction::Moved(self.step(false))
            }
            KeyCode::Tab => TrapAction::Moved(self.step(true)),
            KeyCode::BackTab => TrapAction::Moved(self.step(false)),
            KeyCode::Enter | KeyCode::Char(' ') => match self.focused() {
                FocusTarget::Button(button) => TrapAction::Activate(button),
                FocusTarget::Content => TrapAction::Ignored,
            },
            _ => TrapAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_wraps_both_ways() {
        let listeners = GlobalListeners::new();
        let mut trap = FocusTrap::new("w", &WindowOptions::default(), &listeners);
        assert_eq!(trap.focused(), FocusTarget::Content);
        assert_eq!(
            trap.handle_key(&key(KeyCode::Tab)),
            TrapAction::Moved(FocusTarget::Button(ChromeButton::Minimize))
        );
        assert_eq!(
            trap.handle_key(&key(KeyCode::Tab)),
            TrapAction::Moved(FocusTarget::Button(ChromeButton::Close))
        );
        assert_eq!(
            trap.handle_key(&key(KeyCode::Tab)),
            TrapAction::Moved(FocusTarget::Content)
        );
        assert_eq!(
            trap.handle_key(&key(KeyCode::BackTab)),
            TrapAction::Moved(FocusTarget::Button(ChromeButton::Close))
        );
    }

    #[test]
    fn enter_activates_focused_control_and_escape_closes() {
        let listeners = GlobalListeners::new();
        let mut trap = FocusTrap::new("w", &WindowOptions::default(), &listeners);
        assert_eq!(trap.handle_key(&key(KeyCode::Enter)), TrapAction::Ignored);
        trap.handle_key(&key(KeyCode::Tab));
        assert_eq!(
            trap.handle_key(&key(KeyCode::Enter)),
            TrapAction::Activate(ChromeButton::Minimize)
        );
        assert_eq!(trap.handle_key(&key(KeyCode::Esc)), TrapAction::Close);
        assert_eq!(trap.handle_key(&key(KeyCode::Char('a'))), TrapAction::Ignored);
    }

    #[test]
    fn trap_holds_a_key_listener_until_dropped() {
        let listeners = GlobalListeners::new();
        let trap = FocusTrap::new("w", &WindowOptions::default(), &listeners);
        assert!(listeners.is_listening("w", ListenerKind::KeyDown));
        drop(trap);
        assert_eq!(listeners.active_count(), 0);
    }
}
