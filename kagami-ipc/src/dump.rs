use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::layout::Layout;

/// The documented shape of `wm -d`. bspwm dumps far more than this;
/// fields the mirror does not track are dropped during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmInfo {
    pub focused_monitor_id: u32,
    pub monitors: Vec<MonitorInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    pub id: u32,
    pub name: String,
    pub focused_desktop_id: u32,
    pub desktops: Vec<DesktopInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopInfo {
    pub id: u32,
    pub name: String,
    pub layout: Layout,
}

impl WmInfo {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }
}
