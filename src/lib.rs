//! Floating panel window manager for terminal image-editor shells.
//!
//! The core (`layout`, `window`, `listeners`, `z_order`) is unit-agnostic and
//! free of terminal I/O. `drivers`, `ui`, `components` and `shell` put it on a
//! `ratatui`/`crossterm` screen.

pub mod colors;
pub mod components;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod listeners;
pub mod shell;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
pub mod z_order;

pub use error::{WmError, WmResult};
