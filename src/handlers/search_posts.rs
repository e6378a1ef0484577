use crate::protocol::{SearchPostsParams, ToolResult};

use super::{run_tool, ServerContext};

/// Handle a `search_posts` tool call.
pub async fn handle(params: SearchPostsParams, ctx: &ServerContext) -> ToolResult {
    run_tool(
        ctx,
        &params.url,
        ctx.service
            .search_posts(&params.url, &params.query, params.limit),
    )
    .await
}
