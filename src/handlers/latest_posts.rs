use crate::protocol::{LatestPostsParams, ToolResult};

use super::{run_tool, ServerContext};

/// Handle a `get_latest_posts_by_blog_url` tool call.
///
/// Returns at most `limit` posts (clamped to 20), newest first, with bodies
/// converted from HTML to plain text. A blog with no posts yields an empty list.
pub async fn handle(params: LatestPostsParams, ctx: &ServerContext) -> ToolResult {
    run_tool(
        ctx,
        &params.url,
        ctx.service.list_latest_posts(&params.url, params.limit),
    )
    .await
}
