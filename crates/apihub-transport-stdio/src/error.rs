//! Transport-layer error types.

use thiserror::Error;

/// Errors that stop the stdio server loop.
///
/// Malformed input is not among them: it is answered on the wire and the
/// loop carries on.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from the input stream.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to the output stream.
    #[error("write error: {0}")]
    Write(String),
    /// A reply could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
}
