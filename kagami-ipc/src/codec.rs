use crate::error::ProtocolError;

/// Encode request arguments in bspwm's wire format: arguments joined by a
/// null byte, with one more trailing null.
pub fn encode_request<S: AsRef<str>>(args: &[S]) -> Vec<u8> {
    let mut buf = args
        .iter()
        .map(|a| a.as_ref().as_bytes())
        .collect::<Vec<_>>()
        .join(&0u8);
    buf.push(0);
    buf
}

/// Decode a raw reply: UTF-8 text with one trailing newline stripped, if
/// present.
pub fn decode_reply(raw: Vec<u8>) -> Result<String, ProtocolError> {
    let mut text = String::from_utf8(raw)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_with_nulls() {
        assert_eq!(encode_request(&["wm", "-g"]), b"wm\0-g\0");
        assert_eq!(encode_request(&["wm"]), b"wm\0");
        assert_eq!(
            encode_request(&["subscribe", "monitor", "desktop"]),
            b"subscribe\0monitor\0desktop\0"
        );
    }

    #[test]
    fn test_decode_strips_one_trailing_newline() {
        let reply = decode_reply(b"WMLVDS1:oI:OII:fIII:oIV:LM:TT:G\n".to_vec()).unwrap();
        assert_eq!(reply, "WMLVDS1:oI:OII:fIII:oIV:LM:TT:G");

        assert_eq!(decode_reply(b"no newline".to_vec()).unwrap(), "no newline");
        assert_eq!(decode_reply(b"two\n\n".to_vec()).unwrap(), "two\n");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_reply(vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ProtocolError::Utf8(_)));
    }
}
