use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use kagami_ipc::{codec, ProtocolError};

use crate::error::Result;

/// Send one request to the daemon and read its reply.
///
/// One connection per call, bspc-style: connect, write the encoded
/// arguments in a single burst, read until the daemon closes its end. The
/// connection is dropped on every exit path.
pub async fn request<S: AsRef<str>>(path: &Path, args: &[S]) -> Result<String> {
    let mut stream = UnixStream::connect(path).await?;
    stream.write_all(&codec::encode_request(args)).await?;
    stream.flush().await?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await?;
    Ok(codec::decode_reply(raw)?)
}

/// A live `subscribe` connection yielding one event line per pull.
///
/// Lines are buffered internally, so a line split across read chunks is
/// delivered whole and a chunk carrying several lines yields them one at
/// a time, in order. Dropping the stream closes the socket, which is the
/// cancellation path.
pub struct EventStream {
    reader: BufReader<UnixStream>,
}

impl EventStream {
    pub async fn open<S: AsRef<str>>(path: &Path, topics: &[S]) -> Result<Self> {
        let mut stream = UnixStream::connect(path).await?;

        let mut args = vec!["subscribe".to_string()];
        args.extend(topics.iter().map(|t| t.as_ref().to_string()));
        stream.write_all(&codec::encode_request(&args)).await?;
        stream.flush().await?;

        tracing::debug!("subscribed on {:?}", path);
        Ok(Self {
            reader: BufReader::new(stream),
        })
    }

    /// Read the next event line. `None` once the daemon closes the stream.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let line = String::from_utf8(buf).map_err(ProtocolError::from)?;
        Ok(Some(line))
    }
}
