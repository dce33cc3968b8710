use thiserror::Error;

/// Malformed bytes at the wire-decoding layer.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("reply is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("malformed state dump: {0}")]
    Dump(#[from] serde_json::Error),

    #[error("{event} event expects {expected} arguments, got {got}")]
    BadArity {
        event: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("bad hexadecimal id {value:?} in {event} event")]
    BadId {
        event: &'static str,
        value: String,
    },

    #[error("unknown layout {0:?}")]
    UnknownLayout(String),
}
