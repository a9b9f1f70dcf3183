//! Outcome of routing a request.

use http::Method;
use serde::{Serialize, Serializer};
use treebridge_stack::Params;

/// Result of matching a request against the registered routes
///
/// Failures are values: a path nobody registered and a path registered for
/// other methods are told apart by [`RouteResult::is_method_failure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResult {
    Success {
        matched_route_name: String,
        matched_middleware: String,
        matched_params: Params,
    },
    Failure {
        method_failure: bool,
        #[serde(serialize_with = "serialize_methods")]
        allowed_methods: Vec<Method>,
    },
}

impl RouteResult {
    #[must_use]
    pub fn from_route_match(
        name: impl Into<String>,
        middleware: impl Into<String>,
        params: Params,
    ) -> Self {
        RouteResult::Success {
            matched_route_name: name.into(),
            matched_middleware: middleware.into(),
            matched_params: params,
        }
    }

    /// No route matched the path
    #[must_use]
    pub fn from_route_failure() -> Self {
        RouteResult::Failure {
            method_failure: false,
            allowed_methods: Vec::new(),
        }
    }

    /// The path matched but not for the request method
    #[must_use]
    pub fn from_method_failure(allowed_methods: Vec<Method>) -> Self {
        RouteResult::Failure {
            method_failure: true,
            allowed_methods,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, RouteResult::Success { .. })
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    #[must_use]
    pub fn is_method_failure(&self) -> bool {
        matches!(
            self,
            RouteResult::Failure {
                method_failure: true,
                ..
            }
        )
    }

    #[must_use]
    pub fn matched_route_name(&self) -> Option<&str> {
        match self {
            RouteResult::Success {
                matched_route_name, ..
            } => Some(matched_route_name),
            RouteResult::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn matched_middleware(&self) -> Option<&str> {
        match self {
            RouteResult::Success {
                matched_middleware, ..
            } => Some(matched_middleware),
            RouteResult::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn matched_params(&self) -> Option<&Params> {
        match self {
            RouteResult::Success { matched_params, .. } => Some(matched_params),
            RouteResult::Failure { .. } => None,
        }
    }

    /// Methods the matched path accepts; empty unless this is a method failure
    #[must_use]
    pub fn allowed_methods(&self) -> &[Method] {
        match self {
            RouteResult::Failure {
                allowed_methods, ..
            } => allowed_methods,
            RouteResult::Success { .. } => &[],
        }
    }
}

fn serialize_methods<S: Serializer>(methods: &[Method], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(methods.iter().map(Method::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_accessors() {
        let mut params = Params::new();
        params.insert("id".to_string(), json!("1"));
        let result = RouteResult::from_route_match("/foo", "bar", params);
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert!(!result.is_method_failure());
        assert_eq!(result.matched_route_name(), Some("/foo"));
        assert_eq!(result.matched_middleware(), Some("bar"));
        assert_eq!(result.matched_params().unwrap()["id"], "1");
        assert!(result.allowed_methods().is_empty());
    }

    #[test]
    fn test_failure_kinds() {
        let plain = RouteResult::from_route_failure();
        assert!(plain.is_failure());
        assert!(!plain.is_method_failure());
        assert_eq!(plain.matched_route_name(), None);

        let method = RouteResult::from_method_failure(vec![Method::POST, Method::DELETE]);
        assert!(method.is_failure());
        assert!(method.is_method_failure());
        assert_eq!(method.allowed_methods(), &[Method::POST, Method::DELETE]);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let method = RouteResult::from_method_failure(vec![Method::GET]);
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({ "status": "failure", "method_failure": true, "allowed_methods": ["GET"] })
        );
    }
}
