//! The editor shell: toolbar, canvas placeholder and status bar around a
//! workspace of floating panels.

use std::collections::BTreeMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::debug_log::DebugLogHandle;
use crate::components::panels::PanelKind;
use crate::components::{Component, HelpOverlayComponent, StatusBar};
use crate::drivers::PointerEvent;
use crate::error::WmResult;
use crate::event_loop::ControlFlow;
use crate::layout::{Point, Size};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::{FocusTarget, PointerOutcome, WindowManager, WmConfig};

/// Document size shown on the canvas placeholder.
const DOCUMENT: (u16, u16) = (800, 600);

pub struct EditorShell {
    wm: WindowManager<PanelKind>,
    panels: BTreeMap<String, Box<dyn Component>>,
    log: DebugLogHandle,
    help: HelpOverlayComponent,
    toolbar: StatusBar,
    status: StatusBar,
    workspace: Rect,
}

impl EditorShell {
    pub fn new(config: WmConfig, screen: Rect, log: DebugLogHandle) -> Self {
        let workspace = Self::workspace_for(screen);
        let viewport = Size::new(workspace.width as i32, workspace.height as i32);
        Self::with_manager(WindowManager::new(config, viewport), screen, log)
    }

    /// Build around an existing manager, e.g. one with a fixed clock.
    pub fn with_manager(wm: WindowManager<PanelKind>, screen: Rect, log: DebugLogHandle) -> Self {
        Self {
            wm,
            panels: BTreeMap::new(),
            log,
            help: HelpOverlayComponent::new(),
            toolbar: StatusBar::new(theme::bar_style()),
            status: StatusBar::new(theme::bar_style()),
            workspace: Self::workspace_for(screen),
        }
    }

    /// Everything between the toolbar row and the status row.
    pub fn workspace_for(screen: Rect) -> Rect {
        Rect {
            x: screen.x,
            y: screen.y.saturating_add(1),
            width: screen.width,
            height: screen.height.saturating_sub(2),
        }
    }

    pub fn windows(&self) -> &WindowManager<PanelKind> {
        &self.wm
    }

    pub fn workspace(&self) -> Rect {
        self.workspace
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn help_visible(&self) -> bool {
        self.help.visible()
    }

    /// Open `kind`, or focus the panel already showing it.
    pub fn open_panel(&mut self, kind: PanelKind) -> WmResult<String> {
        let id = self.wm.open(kind.window_config(self.wm.viewport()))?;
        let log = &self.log;
        self.panels.entry(id.clone()).or_insert_with(|| kind.build(log));
        Ok(id)
    }

    pub fn open_new_instance(&mut self, kind: PanelKind) -> WmResult<String> {
        let id = self
            .wm
            .open_new_instance(kind.window_config(self.wm.viewport()))?;
        self.panels.insert(id.clone(), kind.build(&self.log));
        Ok(id)
    }

    pub fn close_all_of_type(&mut self, kind: PanelKind) -> usize {
        let closed = self.wm.close_all_of_type(kind.id()).len();
        self.reap_closed();
        closed
    }

    pub fn close_all(&mut self) -> usize {
        let closed = self.wm.close_all().len();
        self.reap_closed();
        closed
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        let flow = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if let Some(pointer) = PointerEvent::from_mouse(mouse) {
                    self.handle_pointer(pointer);
                }
                ControlFlow::Continue
            }
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.reap_closed();
        flow
    }

    pub fn resize(&mut self, screen: Rect) {
        self.workspace = Self::workspace_for(screen);
        self.wm.set_viewport(Size::new(
            self.workspace.width as i32,
            self.workspace.height as i32,
        ));
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) {
        let origin = Point::new(self.workspace.x as i32, self.workspace.y as i32);
        if self.help.visible() {
            return;
        }
        if let PointerOutcome::Content { id, local } =
            self.wm.handle_pointer(&pointer.translated(origin))
            && let Some(panel) = self.panels.get_mut(&id)
        {
            panel.handle_click(local);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if key.kind == KeyEventKind::Release {
            return ControlFlow::Continue;
        }
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            tracing::debug!("quit requested");
            return ControlFlow::Quit;
        }
        if self.help.handle_key(key) || self.wm.handle_key(key) {
            return ControlFlow::Continue;
        }
        if let Some(id) = self.wm.focused_id().map(str::to_string)
            && self.wm.focus_target(&id) == Some(FocusTarget::Content)
            && let Some(panel) = self.panels.get_mut(&id)
            && panel.handle_key(key)
        {
            return ControlFlow::Continue;
        }
        if let Err(err) = self.handle_binding(key) {
            tracing::warn!(%err, "key binding failed");
        }
        ControlFlow::Continue
    }

    fn handle_binding(&mut self, key: &KeyEvent) -> WmResult<()> {
        let KeyCode::Char(c) = key.code else {
            return Ok(());
        };
        match c {
            '?' => self.help.toggle(),
            'X' => {
                self.close_all();
            }
            _ => {
                let Some(kind) = PanelKind::from_hotkey(c) else {
                    return Ok(());
                };
                if key.modifiers.contains(KeyModifiers::ALT) {
                    self.close_all_of_type(kind);
                } else if c.is_ascii_uppercase() {
                    self.open_new_instance(kind)?;
                } else {
                    self.open_panel(kind)?;
                }
            }
        }
        Ok(())
    }

    fn reap_closed(&mut self) {
        for id in self.wm.take_closed() {
            self.panels.remove(&id);
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let screen = frame.area();
        if screen.width == 0 || screen.height < 3 {
            return;
        }
        if Self::workspace_for(screen) != self.workspace {
            self.resize(screen);
        }
        let workspace = self.workspace;

        self.render_bars(frame, screen);
        render_canvas(frame, workspace);

        let panels = &mut self.panels;
        self.wm.render(frame, workspace, |frame, rect, window, focused| {
            if let Some(panel) = panels.get_mut(&window.id) {
                panel.render(frame, rect, focused);
            }
        });
        self.help.render(frame, screen);
    }

    fn render_bars(&mut self, frame: &mut UiFrame<'_>, screen: Rect) {
        let open = self.wm.registry().len();
        let menu: Vec<String> = PanelKind::ALL
            .iter()
            .map(|kind| hotkey_label(kind.hotkey(), kind.title()))
            .collect();
        self.toolbar.set_left(format!(" easel  {}", menu.join(" ")));
        self.toolbar.set_right(format!(
            "{open} panel{} open ",
            if open == 1 { "" } else { "s" }
        ));
        self.toolbar.render(frame, Rect::new(screen.x, screen.y, screen.width, 1));

        let focused = self
            .wm
            .focused_id()
            .and_then(|id| self.wm.get(id))
            .map_or("none".to_string(), |w| w.title.clone());
        let counts: Vec<String> = PanelKind::ALL
            .iter()
            .filter_map(|kind| {
                let count = self.wm.count_of_type(kind.id());
                (count > 0).then(|| format!("{}×{count}", kind.id()))
            })
            .collect();
        self.status.set_left(format!(" focus: {focused}  ? help"));
        self.status.set_right(format!("{} ", counts.join(" ")));
        let bottom = screen.y + screen.height - 1;
        self.status.render(frame, Rect::new(screen.x, bottom, screen.width, 1));
    }
}

/// `[c]olor` style menu entry: the hotkey in brackets replaces the title's
/// first character.
fn hotkey_label(hotkey: char, title: &str) -> String {
    let rest: String = title.chars().skip(1).collect();
    format!("[{hotkey}]{rest}")
}

fn render_canvas(frame: &mut UiFrame<'_>, area: Rect) {
    let background = Style::default().bg(theme::canvas_bg());
    let fill = " ".repeat(area.width as usize);
    for y in area.y..area.y.saturating_add(area.height) {
        frame.put_str(area.x, y, &fill, background);
    }
    let label = format!("Untitled-1  {}×{}", DOCUMENT.0, DOCUMENT.1);
    let width = label.chars().count() as u16;
    if width <= area.width && area.height > 0 {
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height / 2;
        frame.put_str(x, y, &label, background.fg(theme::accent()));
    }
}
