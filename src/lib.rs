//! Core library for a Mullvad VPN status-bar block
//!
//! Polls the `org.mbachry.Mullvad` D-Bus service for the VPN connection
//! state and renders it as a single colored glyph. The block is usable from
//! Rust through [`render`] or from a C panel through the FFI functions.

mod config;
mod ffi;
mod format;
mod host;
mod ipc;
mod render;
mod state;

pub use config::Config;
pub use ffi::*;
pub use format::safe_format;
pub use host::{Color, Host, SystemHost};
pub use ipc::{query_state, QueryError, SessionBusSource, StateSource, OBJECT_PATH, SERVICE_NAME};
pub use render::{display_for, render, Block, DisplayRecord, RenderError};
pub use state::{ConnectionState, ParseStateError};
