use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Desktop layout mode as bspwm spells it, both in the state dump and in
/// `desktop_layout` event arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Tiled,
    Monocle,
}

impl FromStr for Layout {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiled" => Ok(Layout::Tiled),
            "monocle" => Ok(Layout::Monocle),
            _ => Err(ProtocolError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Tiled => write!(f, "tiled"),
            Layout::Monocle => write!(f, "monocle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trip() {
        assert_eq!("tiled".parse::<Layout>().unwrap(), Layout::Tiled);
        assert_eq!("monocle".parse::<Layout>().unwrap(), Layout::Monocle);
        assert_eq!(Layout::Tiled.to_string(), "tiled");
        assert_eq!(Layout::Monocle.to_string(), "monocle");
    }

    #[test]
    fn test_layout_rejects_unknown_name() {
        let err = "stacked".parse::<Layout>().unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownLayout(_)));
    }
}
