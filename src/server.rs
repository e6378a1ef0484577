use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::handlers::{self, ServerContext};
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
///
/// `tools/call` requests run on their own tasks so a slow upstream does not
/// hold up other requests; all responses go through a single writer task.
pub struct McpServer {
    ctx: Arc<ServerContext>,
    initialized: bool,
}

impl McpServer {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self {
            ctx,
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `input` until EOF, writing responses to `output`.
    pub async fn serve<R, W>(
        &mut self,
        input: R,
        output: W,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer = tokio::spawn(write_responses(output, rx));

        let mut reader = BufReader::new(input);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                tracing::warn!(bytes = n, limit = MAX_MESSAGE_BYTES, "message too large");
                let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "parse error");
                    let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            // Validate jsonrpc version
            if req.jsonrpc != "2.0" {
                let _ = tx.send(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request(),
                ));
                continue;
            }

            // Initialization gate: only `initialize` is allowed before handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.is_notification() {
                    continue;
                }
                let _ = tx.send(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                ));
                continue;
            }

            if req.method == "tools/call" {
                let ctx = Arc::clone(&self.ctx);
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(resp) = handlers::dispatch(&req, &ctx).await {
                        let _ = tx.send(resp);
                    }
                });
                continue;
            }

            if let Some(resp) = handlers::dispatch(&req, &self.ctx).await {
                let _ = tx.send(resp);
            }

            if req.method == "initialize" {
                self.initialized = true;
                tracing::info!("client initialized");
            }
        }

        // In-flight tool calls hold sender clones; the writer drains until they finish.
        drop(tx);
        writer.await??;
        Ok(())
    }
}

async fn write_responses<W>(
    mut output: W,
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(resp) = rx.recv().await {
        let out = serde_json::to_string(&resp)?;
        output.write_all(out.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
