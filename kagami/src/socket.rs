use std::env;
use std::fs;
use std::os::unix::fs::FileTypeExt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// The three components of an X11 DISPLAY string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XDisplay {
    /// Hostname, or empty for the local display.
    pub host: String,
    pub display: u32,
    /// Defaults to 0 when the DISPLAY string has no screen part.
    pub screen: u32,
}

/// Parse a DISPLAY string of the form `host:display` or
/// `host:display.screen`.
pub fn parse_display(display: &str) -> Result<XDisplay> {
    let invalid = || Error::InvalidDisplay(display.to_string());

    let (host, rest) = display.split_once(':').ok_or_else(|| invalid())?;
    let (number, screen) = match rest.split_once('.') {
        None => (rest, "0"),
        Some((_, screen)) if screen.contains('.') => return Err(invalid()),
        Some((number, screen)) => (number, screen),
    };

    Ok(XDisplay {
        host: host.to_string(),
        display: number.parse().map_err(|_| invalid())?,
        screen: screen.parse().map_err(|_| invalid())?,
    })
}

/// The socket path bspwm derives from a display.
pub fn socket_path(display: &XDisplay) -> PathBuf {
    PathBuf::from(format!(
        "/tmp/bspwm{}_{}_{}-socket",
        display.host, display.display, display.screen
    ))
}

/// Locate the daemon's socket: `$BSPWM_SOCKET` verbatim if set, else the
/// path derived from `$DISPLAY`, verified to be a UNIX socket.
pub fn find_socket() -> Result<PathBuf> {
    if let Ok(path) = env::var("BSPWM_SOCKET") {
        return Ok(PathBuf::from(path));
    }
    let display = env::var("DISPLAY").map_err(|_| Error::DisplayUnset)?;
    probe_socket(socket_path(&parse_display(&display)?))
}

fn probe_socket(path: PathBuf) -> Result<PathBuf> {
    match fs::metadata(&path) {
        Ok(meta) if meta.file_type().is_socket() => Ok(path),
        _ => Err(Error::SocketNotFound(path)),
    }
}
