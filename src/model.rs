use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description available.";

// ---------------------------------------------------------------------------
// Upstream resources (Blogger v3 wire format)
// ---------------------------------------------------------------------------

/// Blog resource returned by `blogs/byurl`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub posts: Option<PostCount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCount {
    #[serde(default)]
    pub total_items: Option<u64>,
}

/// Page of post resources returned by `posts` and `posts/search`.
///
/// Blogger omits `items` entirely when a blog has no posts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostList {
    #[serde(default)]
    pub items: Vec<PostResource>,
    #[serde(default)]
    pub total_items: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub author: Option<PostAuthor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    #[serde(default)]
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Tool results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogInfo {
    pub blog_id: String,
    pub blog_title: String,
    pub blog_url: String,
    pub description: String,
    pub published_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u64>,
}

impl From<BlogResource> for BlogInfo {
    fn from(blog: BlogResource) -> Self {
        Self {
            blog_id: blog.id,
            blog_title: blog.name,
            blog_url: blog.url,
            description: blog
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            published_date: blog.published,
            total_posts: blog.posts.and_then(|p| p.total_items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub post_id: String,
    pub title: String,
    pub url: String,
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Payload of the post listing tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsResponse {
    pub blog_title: String,
    pub blog_url: String,
    /// Upstream `totalItems` when reported, otherwise the number of posts returned.
    pub total_posts_found: u64,
    pub posts: Vec<PostSummary>,
}

/// Newest first; posts without a publish date sort last.
pub fn sort_newest_first(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| b.published.cmp(&a.published));
}
