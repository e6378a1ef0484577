use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and get no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Parameters for `get_blog_info_by_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogUrlParams {
    #[serde(alias = "blog_url")]
    pub url: String,
}

/// Parameters for `get_latest_posts_by_blog_url` and `list_recent_posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestPostsParams {
    #[serde(alias = "blog_url")]
    pub url: String,
    /// Accepts i64 so we can detect non-positive values before casting.
    #[serde(default, alias = "num_posts")]
    pub limit: Option<i64>,
}

/// Parameters for `search_posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPostsParams {
    #[serde(alias = "blog_url")]
    pub url: String,
    #[serde(alias = "query_terms")]
    pub query: String,
    #[serde(default, alias = "num_posts")]
    pub limit: Option<i64>,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}
