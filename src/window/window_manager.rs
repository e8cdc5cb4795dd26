//! WindowManager: routes pointer and keyboard input to floating windows and
//! paints them.
//!
//! The registry owns identity, geometry and stacking. The manager adds the
//! per-window interaction state that only exists while a window is open:
//! the drag and resize controllers and the focus trap. Dropping that state
//! releases every global listener the window held, so closing a window
//! mid-drag cannot leak a registration.

use std::collections::BTreeMap;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::constants::DOUBLE_CLICK_MS;
use crate::drivers::{PointerEvent, PointerPhase};
use crate::error::WmResult;
use crate::layout::{Point, Size, visible_rect};
use crate::listeners::{GlobalListeners, ListenerKind};
use crate::ui::UiFrame;

use super::chrome::{ChromeButton, ChromeHit, ChromeLayout};
use super::config::{Backdrop, WindowConfig, WmConfig};
use super::decorator::{DefaultDecorator, WindowDecorator, WindowFocus};
use super::drag::{DragController, DragOptions};
use super::focus_trap::{FocusTarget, FocusTrap, TrapAction};
use super::registry::WindowRegistry;
use super::resize::ResizeController;
use super::WindowInstance;

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing under the pointer belongs to a window.
    Ignored,
    /// Chrome, a backdrop or an active drag/resize took the event.
    Consumed,
    /// The press landed in a window's content area. `local` is relative to
    /// the content's top-left cell.
    Content { id: String, local: Point },
}

enum Press {
    Chrome(String, ChromeHit, ChromeLayout),
    Backdrop(String, Backdrop),
}

#[derive(Debug, Default)]
struct Interaction {
    drag: DragController,
    resize: ResizeController,
    focus: Option<FocusTrap>,
}

pub struct WindowManager<C> {
    registry: WindowRegistry<C>,
    listeners: GlobalListeners,
    interactions: BTreeMap<String, Interaction>,
    decorator: Box<dyn WindowDecorator>,
    closed: Vec<String>,
    last_header_click: Option<(String, u64)>,
}

impl<C: Clone> WindowManager<C> {
    pub fn new(config: WmConfig, viewport: Size) -> Self {
        Self::from_registry(WindowRegistry::new(config, viewport))
    }

    pub fn from_registry(registry: WindowRegistry<C>) -> Self {
        Self {
            registry,
            listeners: GlobalListeners::new(),
            interactions: BTreeMap::new(),
            decorator: Box::new(DefaultDecorator),
            closed: Vec::new(),
            last_header_click: None,
        }
    }

    pub fn with_decorator(mut self, decorator: impl WindowDecorator + 'static) -> Self {
        self.decorator = Box::new(decorator);
        self
    }

    pub fn registry(&self) -> &WindowRegistry<C> {
        &self.registry
    }

    pub fn listeners(&self) -> &GlobalListeners {
        &self.listeners
    }

    pub fn viewport(&self) -> Size {
        self.registry.viewport()
    }

    pub fn get(&self, id: &str) -> Option<&WindowInstance<C>> {
        self.registry.get(id)
    }

    pub fn open(&mut self, config: WindowConfig<C>) -> WmResult<String> {
        let id = self.registry.open(config)?;
        self.sync_interaction(&id);
        Ok(id)
    }

    pub fn open_new_instance(&mut self, config: WindowConfig<C>) -> WmResult<String> {
        let id = self.registry.open_new_instance(config)?;
        self.sync_interaction(&id);
        Ok(id)
    }

    pub fn close(&mut self, id: &str) -> bool {
        let closed = self.registry.close(id);
        if closed {
            self.forget(id.to_string());
        }
        closed
    }

    pub fn close_all(&mut self) -> Vec<String> {
        let ids = self.registry.close_all();
        for id in &ids {
            self.forget(id.clone());
        }
        ids
    }

    pub fn close_all_of_type(&mut self, panel_type: &str) -> Vec<String> {
        let ids = self.registry.close_all_of_type(panel_type);
        for id in &ids {
            self.forget(id.clone());
        }
        ids
    }

    /// Ids closed since the last call, in closing order, so the host can drop
    /// whatever it keeps per window.
    pub fn take_closed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.closed)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.registry.is_open(id)
    }

    pub fn list_open_ids(&self) -> Vec<String> {
        self.registry.list_open_ids()
    }

    pub fn list_ids_of_type(&self, panel_type: &str) -> Vec<String> {
        self.registry.list_ids_of_type(panel_type)
    }

    pub fn count_of_type(&self, panel_type: &str) -> usize {
        self.registry.count_of_type(panel_type)
    }

    pub fn bring_to_front(&mut self, id: &str) -> Option<u64> {
        let z = self.registry.bring_to_front(id);
        if z.is_some() {
            tracing::debug!(window_id = %id, "focused window");
        }
        z
    }

    pub fn minimize(&mut self, id: &str) -> WmResult<bool> {
        let changed = self.registry.minimize(id)?;
        self.end_interactions(id);
        self.sync_interaction(id);
        Ok(changed)
    }

    pub fn restore(&mut self, id: &str) -> WmResult<bool> {
        let changed = self.registry.restore(id)?;
        self.sync_interaction(id);
        Ok(changed)
    }

    pub fn toggle_minimize(&mut self, id: &str) -> WmResult<()> {
        let minimized = self.registry.get(id).is_some_and(|w| w.state.is_minimized());
        if minimized {
            self.restore(id).map(drop)
        } else {
            self.minimize(id).map(drop)
        }
    }

    pub fn toggle_maximize(&mut self, id: &str) -> WmResult<()> {
        self.registry.toggle_maximize(id)?;
        self.end_interactions(id);
        if let Some(window) = self.registry.get(id) {
            window.callbacks.position_changed(window.state.position);
            window.callbacks.size_changed(window.state.size);
        }
        Ok(())
    }

    /// Topmost window that is not minimized; it receives keyboard input.
    pub fn focused_id(&self) -> Option<&str> {
        self.registry
            .stacking_order()
            .into_iter()
            .rev()
            .find(|w| !w.state.is_minimized())
            .map(|w| w.id.as_str())
    }

    /// Where keyboard focus sits inside `id`, while its focus trap is live.
    pub fn focus_target(&self, id: &str) -> Option<FocusTarget> {
        self.interactions
            .get(id)
            .and_then(|i| i.focus.as_ref())
            .map(FocusTrap::focused)
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.interactions.get(id).is_some_and(|i| i.drag.is_dragging())
    }

    pub fn is_resizing(&self, id: &str) -> bool {
        self.interactions
            .get(id)
            .is_some_and(|i| i.resize.is_resizing())
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.registry.set_viewport(viewport);
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerOutcome {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(),
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(id) = self.focused_id().map(str::to_string) else {
            return false;
        };
        if !self.listeners.is_listening(&id, ListenerKind::KeyDown) {
            return false;
        }
        let action = match self
            .interactions
            .get_mut(&id)
            .and_then(|i| i.focus.as_mut())
        {
            Some(trap) => trap.handle_key(key),
            None => return false,
        };
        match action {
            TrapAction::Close => {
                self.close(&id);
                true
            }
            TrapAction::Activate(button) => {
                self.activate(&id, button);
                true
            }
            TrapAction::Moved(_) => true,
            TrapAction::Ignored => false,
        }
    }

    /// Paint every window bottom to top, then the snap preview of an active
    /// drag. `content` is called for each visible content area with the
    /// on-screen rect, the window, and whether it holds focus.
    pub fn render<F>(&self, frame: &mut UiFrame<'_>, area: Rect, mut content: F)
    where
        F: FnMut(&mut UiFrame<'_>, Rect, &WindowInstance<C>, bool),
    {
        let focused = self.focused_id();
        for window in self.registry.stacking_order() {
            if window.options.backdrop != Backdrop::None && !window.state.is_minimized() {
                self.decorator.render_backdrop(frame, area);
            }
            let is_focused = focused == Some(window.id.as_str());
            let button = self
                .interactions
                .get(&window.id)
                .and_then(|i| i.focus.as_ref())
                .and_then(|trap| match trap.focused() {
                    FocusTarget::Button(button) => Some(button),
                    FocusTarget::Content => None,
                });
            let layout = ChromeLayout::for_instance(window);
            self.decorator.render_window(
                frame,
                area,
                &layout,
                &window.title,
                &window.state,
                WindowFocus {
                    window: is_focused,
                    button: button.filter(|_| is_focused),
                },
            );
            if let Some(rect) = layout.content.and_then(|c| visible_rect(c, area)) {
                content(frame, rect, window, is_focused);
            }
        }
        for (id, interaction) in &self.interactions {
            if let (Some(target), Some(window)) =
                (interaction.drag.active_snap(), self.registry.get(id))
            {
                self.decorator
                    .render_snap_preview(frame, area, target.preview_rect(window.state.size));
            }
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        let press = self
            .registry
            .stacking_order()
            .into_iter()
            .rev()
            .find_map(|window| {
                let layout = ChromeLayout::for_instance(window);
                if let Some(hit) = layout.hit_test(event.position) {
                    return Some(Press::Chrome(window.id.clone(), hit, layout));
                }
                // A modal window's backdrop swallows everything beneath it.
                (window.options.backdrop != Backdrop::None && !window.state.is_minimized())
                    .then(|| Press::Backdrop(window.id.clone(), window.options.backdrop))
            });
        let (id, hit, layout) = match press {
            None => return PointerOutcome::Ignored,
            Some(Press::Backdrop(id, Backdrop::Dismiss)) => {
                self.close(&id);
                return PointerOutcome::Consumed;
            }
            Some(Press::Backdrop(id, _)) => {
                self.bring_to_front(&id);
                return PointerOutcome::Consumed;
            }
            Some(Press::Chrome(id, hit, layout)) => (id, hit, layout),
        };

        match hit {
            ChromeHit::Button(button) => {
                self.last_header_click = None;
                self.activate(&id, button);
                PointerOutcome::Consumed
            }
            ChromeHit::Header => {
                self.header_down(&id, event);
                PointerOutcome::Consumed
            }
            ChromeHit::Resize(direction) => {
                self.bring_to_front(&id);
                let Some(size) = self.registry.get(&id).map(|w| w.state.size) else {
                    return PointerOutcome::Ignored;
                };
                let interaction = self.interactions.entry(id.clone()).or_default();
                interaction
                    .resize
                    .begin(&id, event, direction, size, &self.listeners);
                PointerOutcome::Consumed
            }
            ChromeHit::Content => {
                self.bring_to_front(&id);
                let local = layout
                    .content
                    .map_or(Point::default(), |c| event.position - c.origin());
                PointerOutcome::Content { id, local }
            }
            ChromeHit::Frame => {
                self.bring_to_front(&id);
                PointerOutcome::Consumed
            }
        }
    }

    fn header_down(&mut self, id: &str, event: &PointerEvent) {
        let Some(window) = self.registry.get(id) else {
            return;
        };
        let rect = window.state.rect();
        let maximized = window.state.is_maximized();
        let can_maximize = window.options.show_maximize;

        let now = self.registry.now_millis();
        if let Some((prev_id, prev)) = self.last_header_click.take()
            && prev_id == id
            && now.saturating_sub(prev) <= DOUBLE_CLICK_MS
            && can_maximize
        {
            if let Err(err) = self.toggle_maximize(id) {
                tracing::warn!(window_id = %id, %err, "maximize toggle failed");
            }
            return;
        }
        self.last_header_click = Some((id.to_string(), now));

        let interaction = self.interactions.entry(id.to_string()).or_default();
        match interaction.drag.begin(
            id,
            event,
            rect,
            maximized,
            self.registry.sequence(),
            &self.listeners,
        ) {
            Some(z) => {
                if let Err(err) = self.registry.update_state(id, |state| state.z_index = z) {
                    tracing::warn!(window_id = %id, %err, "raise on grab failed");
                }
            }
            None => {
                self.bring_to_front(id);
            }
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> PointerOutcome {
        let owners = self.listeners.owners_of(ListenerKind::PointerMove);
        if owners.is_empty() {
            return PointerOutcome::Ignored;
        }
        let viewport = self.registry.viewport();
        let config = *self.registry.config();
        for owner in owners {
            let Some(window) = self.registry.get(&owner) else {
                continue;
            };
            let state = window.state.clone();
            let constraints = window.constraints;
            let options = window.options;
            let Some(interaction) = self.interactions.get_mut(&owner) else {
                continue;
            };
            let result = if interaction.drag.is_dragging() {
                let drag_options = DragOptions {
                    constrain_to_viewport: options.constrain_to_viewport,
                    enable_snapping: config.enable_snapping && options.enable_snapping,
                    snap_threshold: options.snap_threshold.unwrap_or(config.snap_threshold),
                };
                match interaction
                    .drag
                    .update(event, state.size, viewport, drag_options)
                {
                    Some(update) => self.registry.set_position(&owner, update.position),
                    None => Ok(()),
                }
            } else {
                match interaction.resize.update(
                    event,
                    state.position,
                    &constraints,
                    viewport,
                    options.constrain_to_viewport,
                ) {
                    Some(size) => self.registry.set_size(&owner, size),
                    None => Ok(()),
                }
            };
            if let Err(err) = result {
                tracing::warn!(window_id = %owner, %err, "pointer move dropped");
            }
        }
        PointerOutcome::Consumed
    }

    fn pointer_up(&mut self) -> PointerOutcome {
        let owners = self.listeners.owners_of(ListenerKind::PointerUp);
        if owners.is_empty() {
            return PointerOutcome::Ignored;
        }
        for owner in owners {
            self.end_interactions(&owner);
        }
        PointerOutcome::Consumed
    }

    fn activate(&mut self, id: &str, button: ChromeButton) {
        let result = match button {
            ChromeButton::Close => {
                self.close(id);
                Ok(())
            }
            ChromeButton::Minimize => {
                self.bring_to_front(id);
                self.toggle_minimize(id)
            }
            ChromeButton::Maximize => {
                self.bring_to_front(id);
                self.toggle_maximize(id)
            }
        };
        if let Err(err) = result {
            tracing::warn!(window_id = %id, ?button, %err, "window control failed");
        }
    }

    fn end_interactions(&mut self, id: &str) {
        if let Some(interaction) = self.interactions.get_mut(id) {
            interaction.drag.end();
            interaction.resize.end();
        }
    }

    /// Keep the focus trap alive exactly while the window is open and not
    /// minimized.
    fn sync_interaction(&mut self, id: &str) {
        let Some(window) = self.registry.get(id) else {
            self.interactions.remove(id);
            return;
        };
        let minimized = window.state.is_minimized();
        let options = window.options;
        let interaction = self.interactions.entry(id.to_string()).or_default();
        if minimized {
            interaction.focus = None;
        } else if interaction.focus.is_none() {
            interaction.focus = Some(FocusTrap::new(id, &options, &self.listeners));
        }
    }

    fn forget(&mut self, id: String) {
        self.interactions.remove(&id);
        if self
            .last_header_click
            .as_ref()
            .is_some_and(|(prev, _)| *prev == id)
        {
            self.last_header_click = None;
        }
        self.closed.push(id);
    }
}
