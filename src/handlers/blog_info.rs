use crate::protocol::{BlogUrlParams, ToolResult};

use super::{run_tool, ServerContext};

/// Handle a `get_blog_info_by_url` tool call.
///
/// The URL's hostname is checked against the allowlist before Blogger is
/// contacted; a denied domain never reaches the network.
pub async fn handle(params: BlogUrlParams, ctx: &ServerContext) -> ToolResult {
    run_tool(ctx, &params.url, ctx.service.resolve_blog(&params.url)).await
}
