//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`.
//! Generic over reader and writer so tests can use in-memory buffers.

use std::str::Utf8Error;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// A UTF-8 line, trimmed.
    Text(String),
    /// A line whose bytes are not valid UTF-8.
    Invalid(Utf8Error),
}

/// Reads messages line by line and writes replies one per line.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    buf: Vec<u8>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Transport over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a transport over `reader` and `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            buf: Vec::new(),
            writer,
        }
    }

    /// Reads the next line. `None` on EOF.
    ///
    /// Cancel safe: bytes read before the future is dropped stay buffered
    /// and the next call picks up where it left off.
    pub async fn read_line(&mut self) -> Result<Option<InboundLine>, TransportError> {
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }
        let bytes = std::mem::take(&mut self.buf);
        let line = match String::from_utf8(bytes) {
            Ok(text) => {
                let trimmed = text.trim().to_string();
                trace!(len = trimmed.len(), "read message");
                InboundLine::Text(trimmed)
            }
            Err(e) => InboundLine::Invalid(e.utf8_error()),
        };
        Ok(Some(line))
    }

    /// Writes one message followed by `\n` and flushes.
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");
        let write = |e: std::io::Error| TransportError::Write(e.to_string());
        self.writer.write_all(message.as_bytes()).await.map_err(write)?;
        self.writer.write_all(b"\n").await.map_err(write)?;
        self.writer.flush().await.map_err(write)
    }
}
