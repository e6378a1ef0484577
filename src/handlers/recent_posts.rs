use crate::protocol::{LatestPostsParams, ToolResult};

use super::{run_tool, ServerContext};

/// Handle a `list_recent_posts` tool call (titles and links, no bodies).
pub async fn handle(params: LatestPostsParams, ctx: &ServerContext) -> ToolResult {
    run_tool(
        ctx,
        &params.url,
        ctx.service.list_post_titles(&params.url, params.limit),
    )
    .await
}
