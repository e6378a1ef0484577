#![allow(dead_code)]

use std::time::Duration;

use mcp_blogger_server::config::{parse_domain_list, ServerConfig};
use mcp_blogger_server::handlers::{self, ServerContext};
use mcp_blogger_server::protocol::{JsonRpcRequest, RpcId, ToolCallParams};
use serde_json::{json, Value};

pub const API_KEY: &str = "test-key";
pub const ALLOWED_URL: &str = "https://blog.codonomics.com";

pub fn test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        api_key: API_KEY.to_string(),
        api_base_url: base_url.to_string(),
        allowed_domains: parse_domain_list("blog.codonomics.com, example.org"),
        server_name: "test-blogger-server".to_string(),
        server_description: "test instance".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        tool_timeout: Duration::from_secs(10),
        request_timeout: Duration::from_secs(5),
    }
}

pub fn test_context(config: &ServerConfig) -> ServerContext {
    ServerContext::from_config(config).expect("context should build")
}

pub fn blog_json() -> Value {
    json!({
        "kind": "blogger#blog",
        "id": "4967929378133675647",
        "name": "Codonomics",
        "description": "Economics of writing code",
        "published": "2010-03-05T21:43:00-08:00",
        "url": "http://blog.codonomics.com/",
        "posts": { "totalItems": 312 }
    })
}

pub fn post_json(id: &str, title: &str, published: &str, content: &str) -> Value {
    json!({
        "kind": "blogger#post",
        "id": id,
        "title": title,
        "published": published,
        "url": format!("http://blog.codonomics.com/{id}.html"),
        "content": content,
        "author": { "displayName": "Karthik" }
    })
}

pub fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(RpcId::Number(id)),
        method: method.to_string(),
        params,
    }
}

/// Call a tool and return `(is_error, parsed payload)`.
pub async fn call_tool(ctx: &ServerContext, name: &str, arguments: Value) -> (bool, Value) {
    let params = ToolCallParams {
        name: name.to_string(),
        arguments: Some(arguments),
    };
    let result = handlers::dispatch_tool_call(&params, ctx).await;
    let text = &result.content[0].text;
    let payload = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()));
    (result.is_error, payload)
}
