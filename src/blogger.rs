//! Read-only client for the Blogger v3 HTTP API.
//!
//! See <https://developers.google.com/blogger/docs/3.0/reference>.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{BloggerError, Result};
use crate::model::{BlogResource, PostList};

/// Delay before the single retry of a transient failure.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

const USER_AGENT: &str = concat!("mcp-blogger-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BloggerClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl BloggerClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BloggerError::InvalidInput(
                "Blogger API key must be provided".into(),
            ));
        }

        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| {
                BloggerError::InvalidInput(format!("'{base_url}' is not a valid API base URL"))
            })?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| BloggerError::UpstreamUnavailable(format!("client initialization: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// `GET /blogs/byurl`
    pub async fn get_blog_by_url(&self, blog_url: &str) -> Result<BlogResource> {
        let endpoint = self.endpoint(&["blogs", "byurl"]);
        self.get_json(endpoint, &[("url", blog_url.to_string())], blog_url)
            .await
    }

    /// `GET /blogs/{blogId}/posts`, newest first.
    pub async fn list_posts(
        &self,
        blog_id: &str,
        max_results: u32,
        fetch_bodies: bool,
    ) -> Result<PostList> {
        let endpoint = self.endpoint(&["blogs", blog_id, "posts"]);
        let params = [
            ("maxResults", max_results.to_string()),
            ("orderBy", "published".to_string()),
            ("fetchBodies", fetch_bodies.to_string()),
        ];
        let list: PostList = self.get_json(endpoint, &params, blog_id).await?;
        tracing::debug!(
            blog_id,
            titles = ?list.items.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            "posts listed"
        );
        Ok(list)
    }

    /// `GET /blogs/{blogId}/posts/search`
    pub async fn search_posts(
        &self,
        blog_id: &str,
        query: &str,
        fetch_bodies: bool,
    ) -> Result<PostList> {
        let endpoint = self.endpoint(&["blogs", blog_id, "posts", "search"]);
        let params = [
            ("q", query.to_string()),
            ("orderBy", "published".to_string()),
            ("fetchBodies", fetch_bodies.to_string()),
        ];
        self.get_json(endpoint, &params, blog_id).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET with the API key attached; one retry after a transient failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Url,
        params: &[(&str, String)],
        subject: &str,
    ) -> Result<T> {
        match self.get_once(&endpoint, params, subject).await {
            Err(err) if err.is_transient() => {
                tracing::warn!(
                    path = endpoint.path(),
                    error = %err,
                    "retrying after transient failure"
                );
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.get_once(&endpoint, params, subject).await
            }
            other => other,
        }
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        params: &[(&str, String)],
        subject: &str,
    ) -> Result<T> {
        let response = self
            .http
            .get(endpoint.clone())
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::info!(path = endpoint.path(), subject, "upstream resource not found");
            return Err(BloggerError::NotFound(format!(
                "Blogger has no resource for {subject}"
            )));
        }

        if !status.is_success() {
            let message = upstream_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
            tracing::error!(
                path = endpoint.path(),
                status = status.as_u16(),
                %message,
                "upstream request failed"
            );
            return Err(BloggerError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(path = endpoint.path(), error = %e, "malformed upstream response");
            BloggerError::Upstream {
                status: status.as_u16(),
                message: format!("malformed response body: {e}"),
            }
        })
    }
}

/// Pull `error.message` out of a Google API error body.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_key_and_bad_base() {
        assert!(matches!(
            BloggerClient::new("https://example.org/v3", " ", Duration::from_secs(1)),
            Err(BloggerError::InvalidInput(_))
        ));
        assert!(matches!(
            BloggerClient::new("not a url", "k", Duration::from_secs(1)),
            Err(BloggerError::InvalidInput(_))
        ));
    }

    #[test]
    fn endpoint_appends_segments() {
        let client =
            BloggerClient::new("https://www.googleapis.com/blogger/v3", "k", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.endpoint(&["blogs", "123", "posts"]).as_str(),
            "https://www.googleapis.com/blogger/v3/blogs/123/posts"
        );
    }

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":403,"message":"Daily Limit Exceeded"}}"#;
        assert_eq!(upstream_message(body).as_deref(), Some("Daily Limit Exceeded"));
        assert_eq!(upstream_message("<html>"), None);
    }
}
