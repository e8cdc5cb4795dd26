use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme;
use crate::ui::UiFrame;

const HELP_TEXT: &str = indoc! {"
    Panels
      c color    l layers    b brushes
      h history  p properties  d debug log
      lowercase   open or focus the panel
      Uppercase   open another instance
      Alt+letter  close every panel of that kind
      X           close all panels

    Windows
      drag the header to move, edges to resize
      double-click the header to maximize
      Tab / Shift+Tab  cycle window controls
      Enter            press the focused control
      Esc              close the focused window

    ? toggles this help, Ctrl+Q quits
"};

const WIDTH: u16 = 52;
const HEIGHT: u16 = 21;

#[derive(Debug, Default)]
pub struct HelpOverlayComponent {
    visible: bool,
}

impl HelpOverlayComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Centered dialog rect inside `area`.
    pub fn rect_for(area: Rect) -> Rect {
        let width = WIDTH.min(area.width);
        let height = HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// While visible the overlay swallows every key; Esc, Enter, q and ? hide it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.visible {
            return false;
        }
        if key.kind != KeyEventKind::Release
            && matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
            )
        {
            self.visible = false;
        }
        true
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.modifier.insert(Modifier::DIM);
                }
            }
        }
        let rect = Self::rect_for(area);
        frame.render_widget(Clear, rect);
        let title = format!(" {} {} ", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme::border_style(true));
        let paragraph = Paragraph::new(Text::raw(HELP_TEXT))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, rect);
    }
}
