//! Window registry: identity, lifetime, grouping and stacking of open
//! windows.
//!
//! The window list lives behind an `Rc` and is only ever changed through
//! `Rc::make_mut`, so a `snapshot()` handed out earlier keeps showing the old
//! list and can be compared against the current one with `Rc::ptr_eq`.
//! `revision()` bumps on every change as a cheaper signal.

use std::rc::Rc;

use crate::constants::{DEFAULT_POSITION, ID_SEPARATOR};
use crate::error::{WmError, WmResult};
use crate::layout::{Point, Size, clamp_size, safe_initial_position};
use crate::z_order::ZSequence;

use super::config::{WindowConfig, WmConfig};
use super::sources::{Clock, JitterSource, RandomJitter, SystemClock};
use super::state::WindowState;
use super::WindowInstance;

pub struct WindowRegistry<C> {
    windows: Rc<Vec<WindowInstance<C>>>,
    revision: u64,
    sequence: ZSequence,
    viewport: Size,
    config: WmConfig,
    clock: Box<dyn Clock>,
    jitter: Box<dyn JitterSource>,
}

impl<C: Clone> WindowRegistry<C> {
    pub fn new(config: WmConfig, viewport: Size) -> Self {
        Self {
            windows: Rc::new(Vec::new()),
            revision: 0,
            sequence: ZSequence::new(config.z_base),
            viewport,
            config,
            clock: Box::new(SystemClock),
            jitter: Box::new(RandomJitter::default()),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    /// Share an externally owned stacking sequence.
    pub fn with_sequence(mut self, sequence: ZSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn sequence(&self) -> &ZSequence {
        &self.sequence
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Rc<Vec<WindowInstance<C>>> {
        Rc::clone(&self.windows)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowInstance<C>> {
        self.windows.iter()
    }

    pub fn get(&self, id: &str) -> Option<&WindowInstance<C>> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn windows_mut(&mut self) -> &mut Vec<WindowInstance<C>> {
        self.revision += 1;
        Rc::make_mut(&mut self.windows)
    }

    /// Open window already serving `base_id`: the id itself, or an instance
    /// id of the form `base_id-<digits>`. `color-picker` is its own window,
    /// not an instance of `color`.
    pub fn find_existing(&self, base_id: &str) -> Option<&str> {
        self.windows
            .iter()
            .find(|w| w.id == base_id || is_instance_of(&w.id, base_id))
            .map(|w| w.id.as_str())
    }

    /// Open `config`, or bring its existing window to front. Returns the id
    /// of the window that is now showing the config.
    pub fn open(&mut self, config: WindowConfig<C>) -> WmResult<String> {
        config.validate()?;
        if let Some(existing) = self.find_existing(&config.id).map(str::to_string) {
            self.bring_to_front(&existing);
            tracing::debug!(window_id = %existing, "window already open; raised");
            return Ok(existing);
        }
        let id = if config.id.contains(ID_SEPARATOR) {
            config.id.clone()
        } else {
            self.unique_instance_id(&config.id)
        };
        let title = config.title.clone();
        Ok(self.instantiate(config, id, title))
    }

    /// Always open a fresh window, numbering its title after the windows of
    /// the same panel type that are already open.
    pub fn open_new_instance(&mut self, config: WindowConfig<C>) -> WmResult<String> {
        config.validate()?;
        let id = self.unique_instance_id(&config.id);
        let ordinal = self.count_of_type(config.resolved_panel_type()) + 1;
        let title = format!("{} {}", config.title, ordinal);
        Ok(self.instantiate(config, id, title))
    }

    fn unique_instance_id(&self, base_id: &str) -> String {
        let mut stamp = self.clock.now_millis();
        loop {
            let candidate = format!("{base_id}{ID_SEPARATOR}{stamp}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            stamp = stamp.wrapping_add(1);
        }
    }

    fn instantiate(&mut self, config: WindowConfig<C>, id: String, title: String) -> String {
        let margin = self.config.margin;
        let size = clamp_size(
            config.requested_size(),
            &config.constraints,
            self.viewport,
            margin,
        );
        let base = config
            .initial_position
            .unwrap_or(Point::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1));
        let jitter = self.jitter.jitter(self.config.jitter);
        let position = safe_initial_position(base, size, self.viewport, margin, jitter);
        let z_index = self.sequence.advance();
        let panel_type = config.resolved_panel_type().to_string();
        tracing::debug!(
            window_id = %id,
            panel_type = %panel_type,
            x = position.x,
            y = position.y,
            z = z_index,
            "opened window"
        );
        let instance = WindowInstance {
            id: id.clone(),
            panel_type,
            title,
            content: config.content,
            constraints: config.constraints,
            options: config.options,
            callbacks: config.callbacks,
            state: WindowState::new(position, size, z_index),
        };
        self.windows_mut().push(instance);
        id
    }

    /// Remove `id`. Closing a window that is not open does nothing.
    pub fn close(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        tracing::debug!(window_id = %id, "closing window");
        self.windows_mut().retain(|w| w.id != id);
        true
    }

    pub fn close_all(&mut self) -> Vec<String> {
        if self.windows.is_empty() {
            return Vec::new();
        }
        let ids = self.list_open_ids();
        tracing::debug!(count = ids.len(), "closing all windows");
        self.windows_mut().clear();
        ids
    }

    pub fn close_all_of_type(&mut self, panel_type: &str) -> Vec<String> {
        let ids = self.list_ids_of_type(panel_type);
        if ids.is_empty() {
            return ids;
        }
        tracing::debug!(panel_type, count = ids.len(), "closing windows of type");
        self.windows_mut().retain(|w| w.panel_type != panel_type);
        ids
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids in the order the windows were opened.
    pub fn list_open_ids(&self) -> Vec<String> {
        self.windows.iter().map(|w| w.id.clone()).collect()
    }

    pub fn list_ids_of_type(&self, panel_type: &str) -> Vec<String> {
        self.windows
            .iter()
            .filter(|w| w.panel_type == panel_type)
            .map(|w| w.id.clone())
            .collect()
    }

    pub fn count_of_type(&self, panel_type: &str) -> usize {
        self.windows
            .iter()
            .filter(|w| w.panel_type == panel_type)
            .count()
    }

    /// Advance the shared sequence and stack `id` on top. The sequence moves
    /// even when `id` is not open.
    pub fn bring_to_front(&mut self, id: &str) -> Option<u64> {
        let z = self.sequence.advance();
        if self.get(id).is_none() {
            return None;
        }
        self.update_state(id, |state| state.z_index = z).ok()?;
        tracing::trace!(window_id = %id, z, "raised window");
        Some(z)
    }

    /// Windows from bottom to top. Ties (windows created in the same z step)
    /// keep opening order.
    pub fn stacking_order(&self) -> Vec<&WindowInstance<C>> {
        let mut order: Vec<&WindowInstance<C>> = self.windows.iter().collect();
        order.sort_by_key(|w| w.state.z_index);
        order
    }

    pub fn topmost(&self) -> Option<&WindowInstance<C>> {
        self.stacking_order().pop()
    }

    pub fn update_state<R>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut WindowState) -> R,
    ) -> WmResult<R> {
        let idx = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WmError::UnknownWindow(id.to_string()))?;
        Ok(f(&mut self.windows_mut()[idx].state))
    }

    /// Commit a sanitized position and notify the window's observer.
    pub fn set_position(&mut self, id: &str, position: Point) -> WmResult<()> {
        let changed = self.update_state(id, |state| {
            let changed = state.position != position;
            state.position = position;
            changed
        })?;
        if changed && let Some(window) = self.get(id) {
            window.callbacks.position_changed(position);
        }
        Ok(())
    }

    /// Commit a sanitized size and notify the window's observer.
    pub fn set_size(&mut self, id: &str, size: Size) -> WmResult<()> {
        let changed = self.update_state(id, |state| {
            let changed = state.size != size;
            state.size = size;
            changed
        })?;
        if changed && let Some(window) = self.get(id) {
            window.callbacks.size_changed(size);
        }
        Ok(())
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn minimize(&mut self, id: &str) -> WmResult<bool> {
        self.update_state(id, WindowState::minimize)
    }

    pub fn restore(&mut self, id: &str) -> WmResult<bool> {
        self.update_state(id, WindowState::restore)
    }

    pub fn toggle_minimize(&mut self, id: &str) -> WmResult<()> {
        self.update_state(id, WindowState::toggle_minimize)
    }

    pub fn toggle_maximize(&mut self, id: &str) -> WmResult<()> {
        let viewport = self.viewport;
        self.update_state(id, |state| state.toggle_maximize(viewport))
    }

    /// Resize the space windows live in and re-fit every window into it.
    pub fn set_viewport(&mut self, viewport: Size) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let windows = self.windows_mut();
        for window in windows.iter_mut() {
            let constrain = window.options.constrain_to_viewport;
            let before = window.state.rect();
            if !window
                .state
                .fit_viewport(&window.constraints, viewport, 0, constrain)
            {
                continue;
            }
            if window.state.position != before.origin() {
                window.callbacks.position_changed(window.state.position);
            }
            if window.state.size != before.size() {
                window.callbacks.size_changed(window.state.size);
            }
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
    }
}

fn is_instance_of(id: &str, base_id: &str) -> bool {
    id.strip_prefix(base_id)
        .and_then(|rest| rest.strip_prefix(ID_SEPARATOR))
        .is_some_and(|stamp| !stamp.is_empty() && stamp.bytes().all(|b| b.is_ascii_digit()))
}
