//! Newline-delimited JSON framing for the stdio session.
//!
//! Input lines are read as raw bytes. Lines that do not decode as a client message are
//! answered here with a JSON-RPC error and never reach the session; everything else is
//! handed to `rmcp` as a typed message. All output goes through one line channel drained
//! by [`write_lines`].

use std::pin::Pin;

use futures::{Sink, Stream};
use rmcp::service::{RxJsonRpcMessage, TxJsonRpcMessage};
use rmcp::RoleServer;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// Requests a client may send to a server.
const CLIENT_METHODS: &[&str] = &[
    "initialize",
    "ping",
    "tools/list",
    "tools/call",
    "prompts/list",
    "prompts/get",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "completion/complete",
    "logging/setLevel",
];

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("output closed")]
    Closed,
}

pub type Outbound = Pin<Box<dyn Sink<TxJsonRpcMessage<RoleServer>, Error = TransportError> + Send>>;
pub type Inbound = Pin<Box<dyn Stream<Item = RxJsonRpcMessage<RoleServer>> + Send>>;

/// Sink and stream halves for `rmcp`, reading from `reader` and writing into `out`.
pub fn line_transport<R>(reader: R, out: UnboundedSender<String>) -> (Outbound, Inbound)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    (outbound(out.clone()), inbound(reader, out))
}

fn outbound(out: UnboundedSender<String>) -> Outbound {
    Box::pin(futures::sink::unfold(
        out,
        |out, message: TxJsonRpcMessage<RoleServer>| async move {
            let line = serde_json::to_string(&message)?;
            out.send(line).map_err(|_| TransportError::Closed)?;
            Ok::<_, TransportError>(out)
        },
    ))
}

struct LineReader<R> {
    reader: BufReader<R>,
    out: UnboundedSender<String>,
    buf: Vec<u8>,
}

fn inbound<R>(reader: R, out: UnboundedSender<String>) -> Inbound
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let state = LineReader {
        reader: BufReader::new(reader),
        out,
        buf: Vec::new(),
    };
    Box::pin(futures::stream::unfold(state, |mut state| async move {
        let message = state.next_message().await?;
        Some((message, state))
    }))
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Next decodable message. `None` on end of input, read failure, or once nobody is
    /// writing output any more.
    async fn next_message(&mut self) -> Option<RxJsonRpcMessage<RoleServer>> {
        loop {
            self.buf.clear();
            let read = tokio::select! {
                read = self.reader.read_until(b'\n', &mut self.buf) => read,
                _ = self.out.closed() => {
                    tracing::warn!("output closed, stopping input");
                    return None;
                }
            };
            match read {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "stdin read failed");
                    return None;
                }
            }
            let line = trim_line(&self.buf);
            if line.is_empty() {
                continue;
            }
            match serde_json::from_slice::<RxJsonRpcMessage<RoleServer>>(line) {
                Ok(message) => return Some(message),
                Err(e) => {
                    let Some(reply) = reject(line, &e) else {
                        continue;
                    };
                    if self.out.send(reply).is_err() {
                        return None;
                    }
                }
            }
        }
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let start = line[..end]
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(end);
    &line[start..end]
}

/// Error line for an input line that is not a client message, or `None` when it was a
/// notification (no `id`), which gets no reply.
pub fn reject(line: &[u8], cause: &serde_json::Error) -> Option<String> {
    let (id, code, message) = match serde_json::from_slice::<Value>(line) {
        Err(e) => (Value::Null, PARSE_ERROR, format!("Parse error: {}", e)),
        Ok(value) => {
            let id = value.get("id").cloned().filter(|id| !id.is_null())?;
            match value.get("method").and_then(Value::as_str) {
                Some(method) if !CLIENT_METHODS.contains(&method) => (
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", method),
                ),
                Some(_) => (id, INVALID_PARAMS, format!("Invalid params: {}", cause)),
                None => (id, INVALID_REQUEST, format!("Invalid request: {}", cause)),
            }
        }
    };
    tracing::debug!(code, %message, "rejected input line");
    let reply = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    });
    Some(reply.to_string())
}

/// Writes each line plus `\n`, flushing per line, until every sender is gone.
pub async fn write_lines<W>(mut writer: W, mut lines: UnboundedReceiver<String>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
