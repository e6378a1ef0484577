//! Tool definitions advertised by `tools/list`.

use jsonschema::Validator;
use serde::Serialize;
use serde_json::{json, Value};

use crate::schema::{self, SchemaValidationError};
use crate::service::{DEFAULT_POSTS, DEFAULT_SEARCH_POSTS, MAX_POSTS};

pub const GET_BLOG_INFO: &str = "get_blog_info_by_url";
pub const GET_LATEST_POSTS: &str = "get_latest_posts_by_blog_url";
pub const LIST_RECENT_POSTS: &str = "list_recent_posts";
pub const SEARCH_POSTS: &str = "search_posts";

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    pub annotations: Value,
}

/// Tool definitions with their argument validators compiled once.
pub struct ToolCatalog {
    tools: Vec<(ToolDefinition, Validator)>,
}

impl ToolCatalog {
    pub fn new() -> Result<Self, SchemaValidationError> {
        let tools = definitions()
            .into_iter()
            .map(|def| {
                let validator = schema::compile(&def.input_schema)?;
                Ok((def, validator))
            })
            .collect::<Result<Vec<_>, SchemaValidationError>>()?;
        Ok(Self { tools })
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().map(|(def, _)| def)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|(def, _)| def.name == name)
    }

    /// Validate `arguments` against the named tool's input schema.
    ///
    /// Unknown tool names pass; dispatch reports those separately.
    pub fn validate_arguments(
        &self,
        name: &str,
        arguments: &Value,
    ) -> Result<(), SchemaValidationError> {
        match self.tools.iter().find(|(def, _)| def.name == name) {
            Some((_, validator)) => schema::validate(validator, arguments),
            None => Ok(()),
        }
    }

    /// `tools/list` result payload.
    pub fn list_result(&self) -> Value {
        json!({ "tools": self.definitions().collect::<Vec<_>>() })
    }
}

fn url_properties() -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert(
        "url".into(),
        json!({
            "type": "string",
            "description": "Full URL of the blog, e.g. https://blog.codonomics.com"
        }),
    );
    props.insert(
        "blog_url".into(),
        json!({ "type": "string", "description": "Alias of `url`" }),
    );
    props
}

fn limit_properties(default: u32) -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert(
        "limit".into(),
        json!({
            "type": "integer",
            "description": format!(
                "Maximum number of posts to return (default {default}, capped at {MAX_POSTS})"
            ),
            "minimum": 1
        }),
    );
    props.insert(
        "num_posts".into(),
        json!({ "type": "integer", "description": "Alias of `limit`", "minimum": 1 }),
    );
    props
}

fn url_required() -> Value {
    json!([{ "required": ["url"] }, { "required": ["blog_url"] }])
}

fn annotations(title: &str) -> Value {
    json!({
        "title": title,
        "readOnlyHint": true,
        "openWorldHint": true
    })
}

fn definitions() -> Vec<ToolDefinition> {
    let mut posts_props = url_properties();
    posts_props.extend(limit_properties(DEFAULT_POSTS));

    let mut search_props = url_properties();
    search_props.extend(limit_properties(DEFAULT_SEARCH_POSTS));
    search_props.insert(
        "query".into(),
        json!({ "type": "string", "description": "Search terms", "minLength": 1 }),
    );
    search_props.insert(
        "query_terms".into(),
        json!({ "type": "string", "description": "Alias of `query`", "minLength": 1 }),
    );

    vec![
        ToolDefinition {
            name: GET_BLOG_INFO,
            description: "Retrieves public information about a Blogger blog given its URL. \
                          ONLY works for allowed, pre-configured domains.",
            input_schema: json!({
                "type": "object",
                "properties": url_properties(),
                "anyOf": url_required()
            }),
            annotations: annotations("Get Blog Information By Its URL"),
        },
        ToolDefinition {
            name: GET_LATEST_POSTS,
            description: "Fetches the most recent public blog posts, with content as plain \
                          text, for a specified blog URL. ONLY works for allowed, \
                          pre-configured domains.",
            input_schema: json!({
                "type": "object",
                "properties": posts_props.clone(),
                "anyOf": url_required()
            }),
            annotations: annotations("Get Recent Blog Posts (includes content)"),
        },
        ToolDefinition {
            name: LIST_RECENT_POSTS,
            description: "Fetches the most recent public blog posts (titles and links only) \
                          for a specified blog. ONLY works for allowed, pre-configured domains.",
            input_schema: json!({
                "type": "object",
                "properties": posts_props,
                "anyOf": url_required()
            }),
            annotations: annotations("List Recent Blog Posts (excludes content)"),
        },
        ToolDefinition {
            name: SEARCH_POSTS,
            description: "Searches for blog posts in a specified blog by query terms. \
                          ONLY works for allowed, pre-configured domains.",
            input_schema: json!({
                "type": "object",
                "properties": search_props,
                "allOf": [
                    { "anyOf": url_required() },
                    { "anyOf": [{ "required": ["query"] }, { "required": ["query_terms"] }] }
                ]
            }),
            annotations: annotations("Search Blog Posts"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_compiles_and_lists_four_tools() {
        let catalog = ToolCatalog::new().unwrap();
        let names: Vec<_> = catalog.definitions().map(|d| d.name).collect();
        assert_eq!(names, [GET_BLOG_INFO, GET_LATEST_POSTS, LIST_RECENT_POSTS, SEARCH_POSTS]);
        for def in catalog.definitions() {
            assert_eq!(def.annotations["readOnlyHint"], true);
        }
    }

    #[test]
    fn arguments_are_checked_against_schema() {
        let catalog = ToolCatalog::new().unwrap();
        assert!(catalog
            .validate_arguments(GET_BLOG_INFO, &json!({ "url": "https://a.com" }))
            .is_ok());
        assert!(catalog
            .validate_arguments(GET_BLOG_INFO, &json!({ "blog_url": "https://a.com" }))
            .is_ok());
        assert!(catalog.validate_arguments(GET_BLOG_INFO, &json!({})).is_err());
        assert!(catalog
            .validate_arguments(
                GET_LATEST_POSTS,
                &json!({ "url": "https://a.com", "limit": "five" })
            )
            .is_err());
        assert!(catalog
            .validate_arguments(SEARCH_POSTS, &json!({ "url": "https://a.com" }))
            .is_err());
        assert!(catalog
            .validate_arguments(SEARCH_POSTS, &json!({ "url": "https://a.com", "query": "rust" }))
            .is_ok());
    }

    #[test]
    fn limit_descriptions_advertise_each_default() {
        let catalog = ToolCatalog::new().unwrap();
        let limit_doc = |name: &str| {
            let def = catalog.definitions().find(|d| d.name == name).unwrap();
            def.input_schema["properties"]["limit"]["description"]
                .as_str()
                .unwrap()
                .to_string()
        };
        assert!(limit_doc(GET_LATEST_POSTS).contains("default 3"));
        assert!(limit_doc(SEARCH_POSTS).contains("default 5"));
    }
}
