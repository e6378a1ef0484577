//! Gated blog queries: allowlist check, upstream lookup, response shaping.

use std::sync::Arc;

use crate::blogger::BloggerClient;
use crate::config::ServerConfig;
use crate::error::{BloggerError, Result};
use crate::gatekeeper::DomainGatekeeper;
use crate::html::{HtmlTextConverter, MarkupConverter};
use crate::model::{sort_newest_first, BlogInfo, PostResource, PostSummary, PostsResponse};

/// Upper bound on posts returned by a single call.
pub const MAX_POSTS: u32 = 20;

/// Posts returned by the listing tools when the caller does not ask for a count.
pub const DEFAULT_POSTS: u32 = 3;

/// Posts returned by a search when the caller does not ask for a count.
pub const DEFAULT_SEARCH_POSTS: u32 = 5;

pub struct BlogService {
    gatekeeper: DomainGatekeeper,
    client: BloggerClient,
    converter: Arc<dyn MarkupConverter>,
}

impl BlogService {
    pub fn new(gatekeeper: DomainGatekeeper, client: BloggerClient) -> Self {
        Self::with_converter(gatekeeper, client, Arc::new(HtmlTextConverter))
    }

    pub fn with_converter(
        gatekeeper: DomainGatekeeper,
        client: BloggerClient,
        converter: Arc<dyn MarkupConverter>,
    ) -> Self {
        Self {
            gatekeeper,
            client,
            converter,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = BloggerClient::new(
            &config.api_base_url,
            config.api_key.clone(),
            config.request_timeout,
        )?;
        Ok(Self::new(
            DomainGatekeeper::new(&config.allowed_domains),
            client,
        ))
    }

    /// Look up a blog by its URL.
    pub async fn resolve_blog(&self, url: &str) -> Result<BlogInfo> {
        self.gatekeeper.check(url)?;
        let blog = self
            .client
            .get_blog_by_url(url.trim())
            .await
            .map_err(|err| match err {
                BloggerError::NotFound(_) => BloggerError::NotFound(format!(
                    "Could not find blog at {url}. It might not exist or the URL is incorrect."
                )),
                other => other,
            })?;

        if blog.id.trim().is_empty() {
            return Err(BloggerError::NotFound(format!(
                "Blogger returned no blog id for {url}"
            )));
        }

        let info = BlogInfo::from(blog);
        tracing::info!(url, blog_id = %info.blog_id, "blog resolved");
        Ok(info)
    }

    /// Latest posts with bodies converted to plain text, newest first.
    pub async fn list_latest_posts(&self, url: &str, limit: Option<i64>) -> Result<PostsResponse> {
        self.latest(url, limit, true).await
    }

    /// Latest post titles and links only, newest first.
    pub async fn list_post_titles(&self, url: &str, limit: Option<i64>) -> Result<PostsResponse> {
        self.latest(url, limit, false).await
    }

    /// Posts matching `query`, newest first.
    pub async fn search_posts(
        &self,
        url: &str,
        query: &str,
        limit: Option<i64>,
    ) -> Result<PostsResponse> {
        self.gatekeeper.check(url)?;
        let limit = effective_limit(limit, DEFAULT_SEARCH_POSTS)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(BloggerError::InvalidInput(
                "query must not be empty".into(),
            ));
        }

        let blog = self.resolve_blog(url).await?;
        let list = self.client.search_posts(&blog.blog_id, query, true).await?;
        let total = list.total_items;
        let posts = self.summarize(list.items, limit, true);
        tracing::info!(url, query, found = posts.len(), "posts searched");
        Ok(PostsResponse {
            blog_title: blog.blog_title,
            blog_url: url.to_string(),
            total_posts_found: total.unwrap_or(posts.len() as u64),
            posts,
        })
    }

    async fn latest(
        &self,
        url: &str,
        limit: Option<i64>,
        with_body: bool,
    ) -> Result<PostsResponse> {
        self.gatekeeper.check(url)?;
        let limit = effective_limit(limit, DEFAULT_POSTS)?;

        let blog = self.resolve_blog(url).await?;
        let list = self
            .client
            .list_posts(&blog.blog_id, limit, with_body)
            .await?;
        let total = list.total_items;
        let posts = self.summarize(list.items, limit, with_body);
        tracing::info!(url, found = posts.len(), "posts listed");
        Ok(PostsResponse {
            blog_title: blog.blog_title,
            blog_url: url.to_string(),
            total_posts_found: total.unwrap_or(posts.len() as u64),
            posts,
        })
    }

    fn summarize(&self, items: Vec<PostResource>, limit: u32, with_body: bool) -> Vec<PostSummary> {
        let mut posts: Vec<PostSummary> = items
            .into_iter()
            .map(|post| PostSummary {
                post_id: post.id,
                title: post.title,
                url: post.url,
                published: post.published,
                author: post
                    .author
                    .map(|a| a.display_name)
                    .filter(|name| !name.is_empty()),
                content: if with_body {
                    Some(
                        post.content
                            .map(|html| self.converter.to_plain_text(&html))
                            .unwrap_or_default(),
                    )
                } else {
                    None
                },
            })
            .collect();
        sort_newest_first(&mut posts);
        posts.truncate(limit as usize);
        posts
    }
}

/// Validate a caller-supplied post count: must be positive, clamped to [`MAX_POSTS`].
pub fn effective_limit(limit: Option<i64>, default: u32) -> Result<u32> {
    match limit {
        None => Ok(default),
        Some(n) if n < 1 => Err(BloggerError::InvalidInput(format!(
            "limit must be a positive integer, got {n}"
        ))),
        Some(n) => Ok(n.min(MAX_POSTS as i64) as u32),
    }
}
