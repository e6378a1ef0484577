pub mod request;
pub mod response;

pub use request::{
    BlogUrlParams, InitializeParams, JsonRpcRequest, LatestPostsParams, RpcId, SearchPostsParams,
    ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
