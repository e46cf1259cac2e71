//! Stdio tool server: an `rmcp` [`ServerHandler`] over a [`ToolRegistry`].
//!
//! `rmcp` owns the protocol (handshake, dispatch, concurrent request handling);
//! [`crate::transport`] owns the line framing.

use std::future::Future;
use std::sync::Arc;

use radix::{ToolError, ToolRegistry, ToolSpec};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::transport;

pub const SERVER_NAME: &str = "radix-mcp";

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("initialize: {0}")]
    Initialize(String),
    #[error("session task: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("write: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Runs one session until the input ends or the output is gone, then flushes
    /// whatever responses are still queued.
    pub async fn run<R, W>(self, reader: R, writer: W) -> Result<(), ServeError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (out, lines) = tokio::sync::mpsc::unbounded_channel();
        let writer_task = tokio::spawn(transport::write_lines(writer, lines));

        let session = match self.serve(transport::line_transport(reader, out)).await {
            Ok(running) => running
                .waiting()
                .await
                .map(|reason| tracing::info!(?reason, "session closed"))
                .map_err(ServeError::from),
            Err(e) => Err(ServeError::Initialize(e.to_string())),
        };
        let written = writer_task.await?;
        session?;
        written.map_err(ServeError::from)
    }
}

fn to_mcp_tool(spec: ToolSpec) -> McpTool {
    let schema = match spec.input_schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    McpTool::new(spec.name, spec.description.unwrap_or_default(), Arc::new(schema))
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Radix UI components, documentation and color scales fetched from the \
                 official GitHub repositories."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            let tools = self.registry.list().into_iter().map(to_mcp_tool).collect();
            Ok(ListToolsResult::with_all_items(tools))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let name = request.name.as_ref();
            let args = request
                .arguments
                .map(Value::Object)
                .unwrap_or_else(|| Value::Object(Map::new()));
            match self.registry.call(name, args).await {
                Ok(content) => Ok(CallToolResult::success(vec![Content::text(content.text)])),
                Err(e) => {
                    match &e {
                        ToolError::Fetch { .. } => tracing::warn!(tool = name, error = %e, "tool failed"),
                        _ => tracing::debug!(tool = name, error = %e, "tool rejected call"),
                    }
                    Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
                }
            }
        }
    }
}
