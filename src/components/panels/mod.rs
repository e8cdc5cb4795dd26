//! Editor panels shown inside floating windows, and the catalog the shell
//! opens them from.

use crate::components::Component;
use crate::components::debug_log::{DebugLogComponent, DebugLogHandle};
use crate::layout::Size;
use crate::window::WindowConfig;

pub mod brushes;
pub mod color;
pub mod history;
pub mod layers;
pub mod properties;

pub use brushes::BrushesPanel;
pub use color::ColorPanel;
pub use history::HistoryPanel;
pub use layers::LayersPanel;
pub use properties::{AspectLock, PropertiesPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelKind {
    Color,
    Layers,
    Brushes,
    History,
    Properties,
    DebugLog,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Color,
        PanelKind::Layers,
        PanelKind::Brushes,
        PanelKind::History,
        PanelKind::Properties,
        PanelKind::DebugLog,
    ];

    /// Base window id; also the panel type used for grouping.
    pub fn id(self) -> &'static str {
        match self {
            PanelKind::Color => "color",
            PanelKind::Layers => "layers",
            PanelKind::Brushes => "brushes",
            PanelKind::History => "history",
            PanelKind::Properties => "properties",
            PanelKind::DebugLog => "log",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Color => "Color",
            PanelKind::Layers => "Layers",
            PanelKind::Brushes => "Brushes",
            PanelKind::History => "History",
            PanelKind::Properties => "Properties",
            PanelKind::DebugLog => "Debug Log",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            PanelKind::Color => 'c',
            PanelKind::Layers => 'l',
            PanelKind::Brushes => 'b',
            PanelKind::History => 'h',
            PanelKind::Properties => 'p',
            PanelKind::DebugLog => 'd',
        }
    }

    /// Case-insensitive lookup by hotkey.
    pub fn from_hotkey(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.hotkey() == key)
    }

    pub fn from_panel_type(panel_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == panel_type)
    }

    /// Window config in cells. Right-docked panels are placed from the
    /// viewport width; placement clamps them back on screen when it is small.
    pub fn window_config(self, viewport: Size) -> WindowConfig<PanelKind> {
        let (x, y, width, height) = match self {
            PanelKind::Color => (viewport.width - 32, 1, 30, 16),
            PanelKind::Layers => (viewport.width - 32, 12, 30, 10),
            PanelKind::Brushes => (2, 1, 26, 12),
            PanelKind::History => (2, 13, 24, 12),
            PanelKind::Properties => (30, 2, 30, 10),
            PanelKind::DebugLog => (10, viewport.height - 12, 60, 10),
        };
        WindowConfig::new(self.id(), self.title(), self)
            .initial_position(x, y)
            .size(width, height)
            .min_size(18, 5)
            .resizable(true)
            .show_maximize(true)
    }

    pub fn build(self, log: &DebugLogHandle) -> Box<dyn Component> {
        match self {
            PanelKind::Color => Box::new(ColorPanel::new()),
            PanelKind::Layers => Box::new(LayersPanel::new()),
            PanelKind::Brushes => Box::new(BrushesPanel::new()),
            PanelKind::History => Box::new(HistoryPanel::new()),
            PanelKind::Properties => Box::new(PropertiesPanel::new()),
            PanelKind::DebugLog => Box::new(DebugLogComponent::new(log.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkeys_are_unique_and_case_insensitive() {
        for kind in PanelKind::ALL {
            assert_eq!(PanelKind::from_hotkey(kind.hotkey()), Some(kind));
            assert_eq!(
                PanelKind::from_hotkey(kind.hotkey().to_ascii_uppercase()),
                Some(kind)
            );
            assert_eq!(PanelKind::from_panel_type(kind.id()), Some(kind));
        }
        assert_eq!(PanelKind::from_hotkey('z'), None);
    }

    #[test]
    fn configs_validate() {
        for kind in PanelKind::ALL {
            let config = kind.window_config(Size::new(80, 24));
            assert!(config.validate().is_ok());
            assert_eq!(config.resolved_panel_type(), kind.id());
        }
    }
}
