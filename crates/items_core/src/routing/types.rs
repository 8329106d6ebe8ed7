//! Route tree types (Functional Core - pure data).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::cors::CorsHeader;

/// HTTP verbs the API declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the gateway treats request bodies with no matching template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PassthroughBehavior {
    Never,
    WhenNoMatch,
    WhenNoTemplates,
}

impl PassthroughBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            PassthroughBehavior::Never => "NEVER",
            PassthroughBehavior::WhenNoMatch => "WHEN_NO_MATCH",
            PassthroughBehavior::WhenNoTemplates => "WHEN_NO_TEMPLATES",
        }
    }
}

/// A fixed response produced by the gateway without any backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockIntegration {
    pub status_code: u16,
    pub response_headers: BTreeMap<CorsHeader, String>,
    /// `application/json` request mapping template.
    pub request_template: String,
    pub passthrough: PassthroughBehavior,
}

/// What a method entry forwards to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Integration {
    /// Proxy the request to a declared function.
    Function { function_id: String },
    /// Answer with a static response.
    Mock(MockIntegration),
}

impl Integration {
    pub fn function(function_id: &str) -> Self {
        Integration::Function {
            function_id: function_id.to_string(),
        }
    }

    /// The bound function's logical id, if any.
    pub fn function_id(&self) -> Option<&str> {
        match self {
            Integration::Function { function_id } => Some(function_id),
            Integration::Mock(_) => None,
        }
    }
}

/// A path segment in the API with its methods and child segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    pub path_part: String,
    pub methods: BTreeMap<HttpMethod, Integration>,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path_part: &str) -> Self {
        Self {
            path_part: path_part.to_string(),
            methods: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Adds a method entry, returning the entry it replaced.
    pub fn add_method(&mut self, method: HttpMethod, integration: Integration) -> Option<Integration> {
        self.methods.insert(method, integration)
    }

    /// Returns the child segment `path_part`, creating it when missing.
    pub fn add_resource(&mut self, path_part: &str) -> &mut RouteNode {
        let index = match self.children.iter().position(|c| c.path_part == path_part) {
            Some(index) => index,
            None => {
                self.children.push(RouteNode::new(path_part));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// True when the node carries at least one non-preflight method.
    pub fn has_real_methods(&self) -> bool {
        self.methods.keys().any(|m| *m != HttpMethod::Options)
    }

    /// Pre-order walk yielding `(full_path, node)` for this node and
    /// every descendant.
    pub fn walk<'a>(&'a self, parent_path: &str) -> Vec<(String, &'a RouteNode)> {
        let path = format!("{}/{}", parent_path.trim_end_matches('/'), self.path_part);
        let mut nodes = vec![(path.clone(), self)];
        for child in &self.children {
            nodes.extend(child.walk(&path));
        }
        nodes
    }
}

/// The REST API: a name, a deployment stage and its top-level segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestApiDescriptor {
    pub logical_id: String,
    pub name: String,
    pub stage_name: String,
    pub resources: Vec<RouteNode>,
}

impl RestApiDescriptor {
    /// Every route node with its full path, parents before children.
    pub fn nodes(&self) -> Vec<(String, &RouteNode)> {
        self.resources.iter().flat_map(|r| r.walk("/")).collect()
    }

    /// Looks up a node by full path, e.g. `/items/{id}`.
    pub fn node(&self, path: &str) -> Option<&RouteNode> {
        self.nodes()
            .into_iter()
            .find(|(p, _)| p == path)
            .map(|(_, node)| node)
    }

    /// Total number of method entries across all nodes.
    pub fn method_count(&self) -> usize {
        self.nodes().iter().map(|(_, n)| n.methods.len()).sum()
    }

    /// Deepest number of path segments below the API root.
    pub fn depth(&self) -> usize {
        self.nodes()
            .iter()
            .map(|(path, _)| path.split('/').filter(|s| !s.is_empty()).count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_resource_reuses_existing_child() {
        let mut items = RouteNode::new("items");
        items.add_resource("{id}");
        items.add_resource("{id}");
        assert_eq!(items.children.len(), 1);
    }

    #[test]
    fn test_add_method_returns_replaced_entry() {
        let mut items = RouteNode::new("items");
        assert!(items
            .add_method(HttpMethod::Get, Integration::function("a"))
            .is_none());
        let previous = items.add_method(HttpMethod::Get, Integration::function("b"));
        assert_eq!(previous, Some(Integration::function("a")));
        assert_eq!(items.methods.len(), 1);
    }

    #[test]
    fn test_walk_builds_full_paths() {
        let mut items = RouteNode::new("items");
        items.add_resource("{id}");

        let paths: Vec<String> = items.walk("/").into_iter().map(|(p, _)| p).collect();

        assert_eq!(paths, vec!["/items".to_string(), "/items/{id}".to_string()]);
    }

    #[test]
    fn test_api_depth_and_lookup() {
        let mut items = RouteNode::new("items");
        items
            .add_resource("{id}")
            .add_method(HttpMethod::Delete, Integration::function("del"));
        let api = RestApiDescriptor {
            logical_id: "itemsApi".to_string(),
            name: "Items Service".to_string(),
            stage_name: "prod".to_string(),
            resources: vec![items],
        };

        assert_eq!(api.depth(), 2);
        assert_eq!(api.method_count(), 1);
        assert!(api.node("/items/{id}").is_some());
        assert!(api.node("/other").is_none());
    }

    #[test]
    fn test_has_real_methods_ignores_options() {
        let mut node = RouteNode::new("items");
        node.add_method(HttpMethod::Options, Integration::function("x"));
        assert!(!node.has_real_methods());
        node.add_method(HttpMethod::Post, Integration::function("y"));
        assert!(node.has_real_methods());
    }
}
