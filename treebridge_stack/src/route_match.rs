use serde_json::Value;

/// Route parameters: matched path values merged over route defaults
pub type Params = serde_json::Map<String, Value>;

/// Result of a successful match against the route stack
#[derive(Debug, Clone, PartialEq)]
pub struct StackMatch {
    /// Full route name, child names joined with `/` (e.g. `users/GET`)
    pub matched_route_name: String,
    /// Parameters from every matched level, deeper levels winning
    pub params: Params,
}

impl StackMatch {
    #[must_use]
    pub fn new(matched_route_name: impl Into<String>, params: Params) -> Self {
        Self {
            matched_route_name: matched_route_name.into(),
            params,
        }
    }

    /// Get a parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }
}

/// Match of a single route level, before names are attached
#[derive(Debug, Clone)]
pub(crate) struct PartialMatch {
    /// Number of path bytes consumed from the match offset
    pub length: usize,
    /// Child route name chain below this level, if a child matched
    pub child_name: Option<String>,
    pub params: Params,
}

impl PartialMatch {
    pub(crate) fn new(length: usize, params: Params) -> Self {
        Self {
            length,
            child_name: None,
            params,
        }
    }

    /// Fold a child's match into this one under the child's route name
    pub(crate) fn merge_child(mut self, name: &str, child: PartialMatch) -> Self {
        self.length += child.length;
        self.params.extend(child.params);
        self.child_name = Some(join_name(name, child.child_name.as_deref()));
        self
    }
}

/// `parent` or `parent/child`
pub(crate) fn join_name(parent: &str, child: Option<&str>) -> String {
    match child {
        Some(child) => format!("{parent}/{child}"),
        None => parent.to_string(),
    }
}
