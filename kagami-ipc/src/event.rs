use crate::error::ProtocolError;
use crate::layout::Layout;

/// One line of the `subscribe` stream, parsed.
///
/// Numeric ids are hexadecimal on the wire. Event types this client does
/// not handle are carried through as `Unknown` rather than rejected, so a
/// newer daemon keeps working against an older client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DesktopFocus {
        monitor_id: u32,
        desktop_id: u32,
    },
    DesktopLayout {
        monitor_id: u32,
        desktop_id: u32,
        layout: Layout,
    },
    MonitorGeometry,
    Unknown(String),
}

impl Event {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut parts = line.split(' ');
        let kind = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match kind {
            "desktop_focus" => {
                expect_arity("desktop_focus", &args, 2)?;
                Ok(Event::DesktopFocus {
                    monitor_id: parse_id("desktop_focus", args[0])?,
                    desktop_id: parse_id("desktop_focus", args[1])?,
                })
            }
            "desktop_layout" => {
                expect_arity("desktop_layout", &args, 3)?;
                Ok(Event::DesktopLayout {
                    monitor_id: parse_id("desktop_layout", args[0])?,
                    desktop_id: parse_id("desktop_layout", args[1])?,
                    layout: args[2].parse()?,
                })
            }
            // geometry arguments are ignored; the handler re-reads the
            // whole tree anyway
            "monitor_geometry" => Ok(Event::MonitorGeometry),
            _ => Ok(Event::Unknown(line.to_string())),
        }
    }
}

fn expect_arity(event: &'static str, args: &[&str], expected: usize) -> Result<(), ProtocolError> {
    if args.len() != expected {
        return Err(ProtocolError::BadArity {
            event,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_id(event: &'static str, value: &str) -> Result<u32, ProtocolError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|_| ProtocolError::BadId {
        event,
        value: value.to_string(),
    })
}
