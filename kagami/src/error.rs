use std::path::PathBuf;

use thiserror::Error;

pub use kagami_ipc::ProtocolError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Socket open/read/write failure. Never retried here; reconnection
    /// is the caller's business.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A structurally valid message referenced an id the mirror does not
    /// hold. The mirror and the daemon have diverged.
    #[error("mirror out of sync: {0}")]
    MalformedState(String),

    #[error("cannot parse DISPLAY string {0:?}")]
    InvalidDisplay(String),

    #[error("neither BSPWM_SOCKET nor DISPLAY is set")]
    DisplayUnset,

    #[error("no bspwm socket at {} (is bspwm running?)", .0.display())]
    SocketNotFound(PathBuf),
}
