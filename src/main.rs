use std::io;
use std::time::Duration;

use clap::Parser;
use ratatui::layout::Rect;

use easel_wm::components::debug_log::{DEFAULT_MAX_LINES, DebugLogHandle, set_global_debug_log};
use easel_wm::components::panels::PanelKind;
use easel_wm::drivers::OutputDriver;
use easel_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use easel_wm::event_loop::{ControlFlow, EventLoop};
use easel_wm::shell::EditorShell;
use easel_wm::tracing_sub;
use easel_wm::window::WmConfig;

/// Terminal image-editor shell with floating, draggable panels.
#[derive(Debug, Parser)]
#[command(name = "easel", version, about)]
struct Args {
    /// Distance in cells at which a dragged panel snaps to an edge.
    #[arg(long, value_name = "CELLS")]
    snap_threshold: Option<i32>,

    /// Disable edge snapping while dragging.
    #[arg(long)]
    no_snap: bool,

    /// Gap kept between newly opened panels and the screen edge.
    #[arg(long, value_name = "CELLS")]
    margin: Option<i32>,

    /// Open panels exactly at their default position.
    #[arg(long)]
    no_jitter: bool,

    /// Redraw interval in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    tick_ms: u64,

    /// Panels to open at startup, e.g. `--open color,layers`.
    #[arg(long, value_delimiter = ',', value_parser = parse_panel)]
    open: Vec<PanelKind>,
}

fn parse_panel(value: &str) -> Result<PanelKind, String> {
    PanelKind::from_panel_type(value).ok_or_else(|| {
        let known: Vec<&str> = PanelKind::ALL.iter().map(|kind| kind.id()).collect();
        format!("unknown panel `{value}` (expected one of: {})", known.join(", "))
    })
}

impl Args {
    fn wm_config(&self) -> WmConfig {
        let mut config = WmConfig::cells().with_snapping(!self.no_snap);
        if let Some(threshold) = self.snap_threshold {
            config = config.with_snap_threshold(threshold);
        }
        if let Some(margin) = self.margin {
            config = config.with_margin(margin);
        }
        if self.no_jitter {
            config = config.with_jitter(0);
        }
        config
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let log = DebugLogHandle::new(DEFAULT_MAX_LINES);
    set_global_debug_log(log.clone());
    tracing_sub::init_default();

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let (width, height) = crossterm::terminal::size()?;
    let mut shell = EditorShell::new(args.wm_config(), Rect::new(0, 0, width, height), log);
    for kind in &args.open {
        if let Err(err) = shell.open_panel(*kind) {
            tracing::warn!(%err, panel = kind.id(), "could not open startup panel");
        }
    }
    tracing::info!(width, height, "easel started");

    let mut event_loop = EventLoop::new(
        ConsoleInputDriver::new(),
        Duration::from_millis(args.tick_ms),
    );
    let result = event_loop.run(|_, event| match event {
        None => {
            output.draw(|mut frame| shell.render(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(shell.handle_event(&event)),
    });

    output.exit()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_cell_defaults() {
        let args = Args::try_parse_from([
            "easel",
            "--snap-threshold",
            "3",
            "--margin",
            "0",
            "--no-jitter",
            "--open",
            "color,layers",
        ])
        .unwrap();
        let config = args.wm_config();
        assert_eq!(config.snap_threshold, 3);
        assert_eq!(config.margin, 0);
        assert_eq!(config.jitter, 0);
        assert!(config.enable_snapping);
        assert_eq!(args.open, [PanelKind::Color, PanelKind::Layers]);
    }

    #[test]
    fn unknown_panel_is_rejected() {
        assert!(Args::try_parse_from(["easel", "--open", "canvas"]).is_err());
        let args = Args::try_parse_from(["easel", "--no-snap"]).unwrap();
        assert!(!args.wm_config().enable_snapping);
    }
}
