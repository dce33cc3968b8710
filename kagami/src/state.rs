use std::collections::HashMap;

use kagami_ipc::{Event, Layout, WmInfo};

use crate::error::{Error, Result};

pub type MonitorId = u32;
pub type DesktopId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desktop {
    pub id: DesktopId,
    pub name: String,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub id: MonitorId,
    pub name: String,
    pub desktops: HashMap<DesktopId, Desktop>,
    /// Always a key of `desktops`.
    pub focused_desktop: DesktopId,
}

impl Monitor {
    pub fn focused(&self) -> Option<&Desktop> {
        self.desktops.get(&self.focused_desktop)
    }
}

/// The in-process mirror of the daemon's monitor/desktop tree.
///
/// Built wholesale from a state dump, then mutated one event at a time by
/// the subscription loop, which is the sole writer. Sharing the mirror
/// with concurrent readers needs a reader-writer guard around the whole
/// tree; focus swaps must not be observed half-done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmState {
    pub monitors: HashMap<MonitorId, Monitor>,
    /// Always a key of `monitors`.
    pub focused_monitor: MonitorId,
}

impl WmState {
    /// Build a fresh mirror from a parsed state dump. Both focus ids must
    /// resolve within the dump itself; a dangling reference means the
    /// daemon broke its own contract.
    pub fn from_info(info: WmInfo) -> Result<Self> {
        let mut monitors = HashMap::new();
        for monitor in info.monitors {
            let desktops: HashMap<DesktopId, Desktop> = monitor
                .desktops
                .into_iter()
                .map(|d| {
                    (
                        d.id,
                        Desktop {
                            id: d.id,
                            name: d.name,
                            layout: d.layout,
                        },
                    )
                })
                .collect();

            if !desktops.contains_key(&monitor.focused_desktop_id) {
                return Err(Error::MalformedState(format!(
                    "focused desktop {:#x} is not on monitor {}",
                    monitor.focused_desktop_id, monitor.name
                )));
            }

            monitors.insert(
                monitor.id,
                Monitor {
                    id: monitor.id,
                    name: monitor.name,
                    desktops,
                    focused_desktop: monitor.focused_desktop_id,
                },
            );
        }

        if !monitors.contains_key(&info.focused_monitor_id) {
            return Err(Error::MalformedState(format!(
                "focused monitor {:#x} is not in the dump",
                info.focused_monitor_id
            )));
        }

        Ok(Self {
            monitors,
            focused_monitor: info.focused_monitor_id,
        })
    }

    pub fn focused(&self) -> Option<&Monitor> {
        self.monitors.get(&self.focused_monitor)
    }

    /// Apply one event's mutation to the mirror.
    ///
    /// `MonitorGeometry` is a no-op here; the subscription loop answers it
    /// with a full re-bootstrap instead of incremental tree surgery.
    pub fn apply(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::DesktopFocus {
                monitor_id,
                desktop_id,
            } => {
                let monitor = self.monitor_mut("desktop_focus", *monitor_id)?;
                if !monitor.desktops.contains_key(desktop_id) {
                    return Err(Error::MalformedState(format!(
                        "desktop_focus names desktop {:#x}, unknown on monitor {}",
                        desktop_id, monitor.name
                    )));
                }
                monitor.focused_desktop = *desktop_id;
            }
            Event::DesktopLayout {
                monitor_id,
                desktop_id,
                layout,
            } => {
                let monitor = self.monitor_mut("desktop_layout", *monitor_id)?;
                let name = monitor.name.clone();
                let desktop = monitor.desktops.get_mut(desktop_id).ok_or_else(|| {
                    Error::MalformedState(format!(
                        "desktop_layout names desktop {:#x}, unknown on monitor {}",
                        desktop_id, name
                    ))
                })?;
                desktop.layout = *layout;
            }
            Event::MonitorGeometry | Event::Unknown(_) => {}
        }
        Ok(())
    }

    fn monitor_mut(&mut self, event: &str, id: MonitorId) -> Result<&mut Monitor> {
        self.monitors.get_mut(&id).ok_or_else(|| {
            Error::MalformedState(format!("{} names unknown monitor {:#x}", event, id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kagami_ipc::{DesktopInfo, MonitorInfo};

    fn two_monitor_info() -> WmInfo {
        WmInfo {
            focused_monitor_id: 1,
            monitors: vec![
                MonitorInfo {
                    id: 1,
                    name: "LVDS1".to_string(),
                    focused_desktop_id: 10,
                    desktops: vec![
                        DesktopInfo {
                            id: 10,
                            name: "I".to_string(),
                            layout: Layout::Tiled,
                        },
                        DesktopInfo {
                            id: 11,
                            name: "II".to_string(),
                            layout: Layout::Monocle,
                        },
                    ],
                },
                MonitorInfo {
                    id: 2,
                    name: "HDMI1".to_string(),
                    focused_desktop_id: 20,
                    desktops: vec![DesktopInfo {
                        id: 20,
                        name: "III".to_string(),
                        layout: Layout::Tiled,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_from_info_builds_full_tree() {
        let state = WmState::from_info(two_monitor_info()).unwrap();

        assert_eq!(state.monitors.len(), 2);
        assert_eq!(state.monitors[&1].desktops.len(), 2);
        assert_eq!(state.monitors[&2].desktops.len(), 1);

        let focused_monitor = state.focused().unwrap();
        assert_eq!(focused_monitor.name, "LVDS1");
        assert_eq!(focused_monitor.focused().unwrap().name, "I");
        assert_eq!(state.monitors[&2].focused().unwrap().name, "III");
    }

    #[test]
    fn test_from_info_rejects_dangling_focused_desktop() {
        let mut info = two_monitor_info();
        info.monitors[0].focused_desktop_id = 99;
        assert!(matches!(
            WmState::from_info(info).unwrap_err(),
            Error::MalformedState(_)
        ));
    }

    #[test]
    fn test_from_info_rejects_dangling_focused_monitor() {
        let mut info = two_monitor_info();
        info.focused_monitor_id = 99;
        assert!(matches!(
            WmState::from_info(info).unwrap_err(),
            Error::MalformedState(_)
        ));
    }

    #[test]
    fn test_desktop_focus_updates_exactly_one_monitor() {
        let mut state = WmState::from_info(two_monitor_info()).unwrap();
        let before = state.clone();

        state
            .apply(&Event::DesktopFocus {
                monitor_id: 1,
                desktop_id: 11,
            })
            .unwrap();

        assert_eq!(state.monitors[&1].focused_desktop, 11);
        assert_eq!(state.monitors[&2], before.monitors[&2]);
        assert_eq!(state.focused_monitor, before.focused_monitor);
        // layouts are untouched by a focus change
        assert_eq!(
            state.monitors[&1].desktops[&10].layout,
            before.monitors[&1].desktops[&10].layout
        );
    }

    #[test]
    fn test_desktop_focus_rejects_unknown_ids() {
        let mut state = WmState::from_info(two_monitor_info()).unwrap();

        assert!(matches!(
            state
                .apply(&Event::DesktopFocus {
                    monitor_id: 9,
                    desktop_id: 10,
                })
                .unwrap_err(),
            Error::MalformedState(_)
        ));

        // desktop 20 exists, but on the other monitor
        assert!(matches!(
            state
                .apply(&Event::DesktopFocus {
                    monitor_id: 1,
                    desktop_id: 20,
                })
                .unwrap_err(),
            Error::MalformedState(_)
        ));
    }

    #[test]
    fn test_desktop_layout_updates_one_desktop_and_is_idempotent() {
        let mut state = WmState::from_info(two_monitor_info()).unwrap();
        let before = state.clone();
        let event = Event::DesktopLayout {
            monitor_id: 1,
            desktop_id: 10,
            layout: Layout::Monocle,
        };

        state.apply(&event).unwrap();
        assert_eq!(state.monitors[&1].desktops[&10].layout, Layout::Monocle);
        assert_eq!(
            state.monitors[&1].desktops[&11],
            before.monitors[&1].desktops[&11]
        );
        assert_eq!(state.monitors[&2], before.monitors[&2]);
        assert_eq!(state.monitors[&1].focused_desktop, 10);

        let once = state.clone();
        state.apply(&event).unwrap();
        assert_eq!(state, once);
    }

    #[test]
    fn test_desktop_layout_rejects_unknown_desktop() {
        let mut state = WmState::from_info(two_monitor_info()).unwrap();
        assert!(matches!(
            state
                .apply(&Event::DesktopLayout {
                    monitor_id: 2,
                    desktop_id: 10,
                    layout: Layout::Tiled,
                })
                .unwrap_err(),
            Error::MalformedState(_)
        ));
    }

    #[test]
    fn test_unknown_event_leaves_state_untouched() {
        let mut state = WmState::from_info(two_monitor_info()).unwrap();
        let before = state.clone();
        state
            .apply(&Event::Unknown("node_add 0x1 0x2".to_string()))
            .unwrap();
        assert_eq!(state, before);
    }
}
