use std::collections::BTreeSet;
use std::time::Duration;

/// Default timeout for a whole tool call (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Default timeout for a single upstream request (10 seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/blogger/v3";
pub const DEFAULT_SERVER_NAME: &str = "QueryBloggerMCPServer";
pub const DEFAULT_SERVER_DESCRIPTION: &str =
    "Provides read-only tools to query public Blogger content from specific, allowed domains.";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub allowed_domains: BTreeSet<String>,
    pub server_name: String,
    pub server_description: String,
    pub host: String,
    pub port: u16,
    pub tool_timeout: Duration,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `BLOGGER_API_KEY` (required): key passed to every upstream request
    /// - `ALLOWED_DOMAINS` (optional, comma separated): hostnames that may be queried
    /// - `BLOGGER_API_BASE_URL` (optional): upstream API root
    /// - `MCP_SERVER_NAME`, `MCP_SERVER_DESCRIPTION` (optional): reported on `initialize`
    /// - `MCP_HOST`, `MCP_PORT` (optional, default 0.0.0.0:8000): HTTP transport bind address
    /// - `MCP_TOOL_TIMEOUT_SECS` (optional, default 30): max seconds per tool call
    /// - `BLOGGER_REQUEST_TIMEOUT_SECS` (optional, default 10): max seconds per upstream request
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("BLOGGER_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| "BLOGGER_API_KEY environment variable is not set".to_string())?;

        let allowed_domains = parse_domain_list(&lookup("ALLOWED_DOMAINS").unwrap_or_default());

        let api_base_url = lookup("BLOGGER_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let port = match lookup("MCP_PORT") {
            Some(val) => val
                .trim()
                .parse::<u16>()
                .map_err(|_| "MCP_PORT must be a valid port number".to_string())?,
            None => 8000,
        };

        Ok(Self {
            api_key,
            api_base_url,
            allowed_domains,
            server_name: lookup("MCP_SERVER_NAME")
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            server_description: lookup("MCP_SERVER_DESCRIPTION")
                .unwrap_or_else(|| DEFAULT_SERVER_DESCRIPTION.to_string()),
            host: lookup("MCP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            tool_timeout: parse_secs(&lookup, "MCP_TOOL_TIMEOUT_SECS", DEFAULT_TOOL_TIMEOUT_SECS)?,
            request_timeout: parse_secs(
                &lookup,
                "BLOGGER_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }

    /// HTTP transport bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => match val.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(format!("{key} must be a positive integer")),
        },
        None => Ok(Duration::from_secs(default)),
    }
}

/// Split a comma-separated domain list into a set of lowercase hostnames.
pub fn parse_domain_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|d| d.trim().trim_end_matches('.').to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
