//! Client library for mirroring bspwm state: bootstrap a full snapshot of
//! the monitor/desktop tree over the daemon's socket, then follow the
//! event subscription to keep the mirror live.

pub mod error;
pub mod ipc;
pub mod socket;
pub mod state;
pub mod wm;

pub use error::{Error, Result};
pub use state::{Desktop, Monitor, WmState};
pub use wm::Wm;
