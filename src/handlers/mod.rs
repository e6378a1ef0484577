pub mod blog_info;
pub mod latest_posts;
pub mod recent_posts;
pub mod search_posts;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::BloggerError;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode, McpErrorResponse,
    ToolCallParams, ToolResult,
};
use crate::service::BlogService;
use crate::tools::{self, ToolCatalog};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Everything a request needs, built once at startup and shared read-only.
pub struct ServerContext {
    pub server_name: String,
    pub server_description: String,
    pub tool_timeout: Duration,
    pub service: BlogService,
    pub catalog: ToolCatalog,
}

impl ServerContext {
    pub fn new(config: &ServerConfig, service: BlogService) -> Result<Self, String> {
        let catalog = ToolCatalog::new().map_err(|e| format!("invalid tool schema: {e}"))?;
        Ok(Self {
            server_name: config.server_name.clone(),
            server_description: config.server_description.clone(),
            tool_timeout: config.tool_timeout,
            service,
            catalog,
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, String> {
        let service = BlogService::from_config(config).map_err(|e| e.to_string())?;
        Self::new(config, service)
    }
}

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, ctx: &ServerContext) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            if let Some(init) = req
                .params
                .clone()
                .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            {
                tracing::info!(
                    client = ?init.client_info.as_ref().and_then(|c| c.name.as_deref()),
                    client_version = ?init.client_info.as_ref().and_then(|c| c.version.as_deref()),
                    protocol_version = ?init.protocol_version,
                    "initialize"
                );
            }
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": ctx.server_name,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": ctx.server_description
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        // Notifications never get a response, whatever the method.
        _ if req.is_notification() => None,

        method if method.starts_with("notifications/") => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            ctx.catalog.list_result(),
        )),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(invalid_call(
                            req,
                            format!("Invalid tools/call params: {e}"),
                        ));
                    }
                },
                None => return Some(invalid_call(req, "Missing params for tools/call")),
            };

            let tool_result = dispatch_tool_call(&params, ctx).await;
            let response = match serde_json::to_value(&tool_result) {
                Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
                Err(e) => {
                    tracing::error!(error = %e, "tool result serialization failed");
                    JsonRpcResponse::error(
                        req.id.clone(),
                        McpErrorResponse::canonical(McpErrorCode::InternalError).into(),
                    )
                }
            };
            Some(response)
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Malformed `tools/call` envelope: a JSON-RPC error carrying the MCP payload.
fn invalid_call(req: &JsonRpcRequest, message: impl Into<String>) -> JsonRpcResponse {
    let error = McpErrorResponse::new(McpErrorCode::InvalidInput, message);
    JsonRpcResponse::error(req.id.clone(), JsonRpcError::from(error))
}

pub async fn dispatch_tool_call(params: &ToolCallParams, ctx: &ServerContext) -> ToolResult {
    let name = params.name.as_str();
    if !ctx.catalog.contains(name) {
        return ToolResult::error(format!("Unknown tool: {name}"));
    }

    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    if let Err(e) = ctx.catalog.validate_arguments(name, &arguments) {
        return McpErrorResponse::new(
            McpErrorCode::InvalidInput,
            format!("Invalid arguments for {name}: {e}"),
        )
        .into();
    }

    tracing::info!(tool = name, "tool call received");
    match name {
        tools::GET_BLOG_INFO => match parse_arguments(name, arguments) {
            Ok(p) => blog_info::handle(p, ctx).await,
            Err(r) => r,
        },
        tools::GET_LATEST_POSTS => match parse_arguments(name, arguments) {
            Ok(p) => latest_posts::handle(p, ctx).await,
            Err(r) => r,
        },
        tools::LIST_RECENT_POSTS => match parse_arguments(name, arguments) {
            Ok(p) => recent_posts::handle(p, ctx).await,
            Err(r) => r,
        },
        tools::SEARCH_POSTS => match parse_arguments(name, arguments) {
            Ok(p) => search_posts::handle(p, ctx).await,
            Err(r) => r,
        },
        _ => ToolResult::error(format!("Unknown tool: {name}")),
    }
}

fn parse_arguments<T: DeserializeOwned>(
    name: &str,
    arguments: serde_json::Value,
) -> Result<T, ToolResult> {
    serde_json::from_value(arguments).map_err(|e| {
        McpErrorResponse::new(
            McpErrorCode::InvalidInput,
            format!("Invalid arguments for {name}: {e}"),
        )
        .into()
    })
}

/// Run a query under the tool timeout and shape its outcome into a tool result.
async fn run_tool<T, F>(ctx: &ServerContext, requested_url: &str, query: F) -> ToolResult
where
    T: Serialize,
    F: Future<Output = Result<T, BloggerError>>,
{
    let outcome = match tokio::time::timeout(ctx.tool_timeout, query).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(
                url = requested_url,
                timeout_ms = ctx.tool_timeout.as_millis() as u64,
                "tool call timed out"
            );
            Err(BloggerError::UpstreamUnavailable(format!(
                "no response within {} ms",
                ctx.tool_timeout.as_millis()
            )))
        }
    };

    match outcome {
        Ok(value) => ToolResult::json(&value),
        Err(err) => {
            tracing::warn!(url = requested_url, error = %err, "tool call failed");
            McpErrorResponse::from(err)
                .with_requested_url(requested_url)
                .into()
        }
    }
}
