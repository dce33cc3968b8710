pub mod codec;
pub mod dump;
pub mod error;
pub mod event;
pub mod layout;

pub use codec::{decode_reply, encode_request};
pub use dump::{DesktopInfo, MonitorInfo, WmInfo};
pub use error::ProtocolError;
pub use event::Event;
pub use layout::Layout;
