//! MCP server for read-only Blogger queries.
//!
//! Exposes `get_blog_info_by_url`, `get_latest_posts_by_blog_url`,
//! `list_recent_posts` and `search_posts` over JSON-RPC 2.0, on stdio or
//! stateless HTTP. Every call is restricted to an allowlist of blog domains.

pub mod blogger;
pub mod config;
pub mod error;
pub mod gatekeeper;
pub mod handlers;
pub mod html;
pub mod http;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod server;
pub mod service;
pub mod tools;

pub mod schema;
