//! MCP server loop over the stdio transport.
//!
//! Every incoming line is handled on its own task, so a slow tool call does
//! not hold up the requests behind it. Replies are funnelled through a
//! channel back to the single writer and may leave in any order; clients
//! match them by id. On EOF the loop stops reading, waits for in-flight
//! requests to answer, then returns.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use apihub_mcp::{JsonRpcOutput, McpHandler};

use crate::error::TransportError;
use crate::transport::{InboundLine, StdioTransport};

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: Arc<McpHandler>,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a server over `transport`.
    pub fn new(transport: StdioTransport<R, W>, handler: impl Into<Arc<McpHandler>>) -> Self {
        Self {
            transport,
            handler: handler.into(),
        }
    }

    /// Runs until the input is closed and every accepted request has been
    /// answered.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server starting on stdio");

        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcOutput>();
        // Dropped on EOF; `rx` then drains and yields `None` once the last
        // in-flight task has replied.
        let mut tx = Some(tx);

        loop {
            tokio::select! {
                line = self.transport.read_line(), if tx.is_some() => match line? {
                    None => {
                        info!("stdin closed, draining in-flight requests");
                        tx = None;
                    }
                    Some(InboundLine::Text(line)) if line.is_empty() => {}
                    Some(InboundLine::Text(line)) => {
                        if let Some(tx) = &tx {
                            self.spawn_message(line, tx.clone());
                        }
                    }
                    Some(InboundLine::Invalid(e)) => {
                        warn!(error = %e, "input line is not valid UTF-8");
                        let output = JsonRpcOutput::parse_error(format!("invalid UTF-8: {e}"));
                        self.write_output(&output).await?;
                    }
                },
                reply = rx.recv() => match reply {
                    Some(output) => self.write_output(&output).await?,
                    None => break,
                },
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    fn spawn_message(&self, line: String, tx: mpsc::UnboundedSender<JsonRpcOutput>) {
        let handler = Arc::clone(&self.handler);
        tokio::spawn(async move {
            if let Some(output) = handler.handle_text(&line).await {
                if tx.send(output).is_err() {
                    debug!("reply dropped, server already stopped");
                }
            }
        });
    }

    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        match output.to_json() {
            Ok(json) => self.transport.write_line(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Encode(e.to_string()))
            }
        }
    }
}
