use http::Method;
use serde_json::{json, Map, Value};

use crate::route::{HttpMethods, Route};

/// Child route name, and param key, of the method-not-allowed fallback
pub const METHOD_NOT_ALLOWED_ROUTE: &str = "method_not_allowed";

/// Param key carrying the middleware name
pub const MIDDLEWARE_PARAM: &str = "middleware";

/// Stack config for `route`
///
/// Restricted routes always produce one child per method plus the fallback.
#[must_use]
pub fn route_config(route: &Route) -> Value {
    match route.allowed_methods() {
        HttpMethods::Any => {
            let mut options = segment_options(route);
            let defaults = options
                .entry("defaults")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(defaults) = defaults {
                defaults.insert(
                    MIDDLEWARE_PARAM.to_string(),
                    Value::String(route.middleware().to_string()),
                );
            }
            json!({
                "type": "segment",
                "options": options,
            })
        }
        HttpMethods::Only(methods) => {
            let mut child_routes = Map::with_capacity(methods.len() + 1);
            for method in methods {
                child_routes.insert(
                    method.as_str().to_string(),
                    method_route_config(method, route.middleware()),
                );
            }
            child_routes.insert(
                METHOD_NOT_ALLOWED_ROUTE.to_string(),
                method_not_allowed_config(route.path()),
            );
            json!({
                "type": "segment",
                "options": segment_options(route),
                "may_terminate": false,
                "child_routes": child_routes,
            })
        }
    }
}

/// `method` child dispatching to `middleware`
#[must_use]
pub fn method_route_config(method: &Method, middleware: &str) -> Value {
    json!({
        "type": "method",
        "options": {
            "verb": method.as_str(),
            "defaults": {
                MIDDLEWARE_PARAM: middleware,
            },
        },
    })
}

/// Lowest-priority child that matches whatever is left of `path` (trailing
/// slashes only) and reports the path back through its defaults
#[must_use]
pub fn method_not_allowed_config(path: &str) -> Value {
    json!({
        "type": "regex",
        "priority": -1,
        "options": {
            "regex": "/*$",
            "defaults": {
                METHOD_NOT_ALLOWED_ROUTE: path,
            },
            "spec": "",
        },
    })
}

fn segment_options(route: &Route) -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("route".to_string(), Value::String(route.path().to_string()));

    let route_options = route.options();
    if !route_options.constraints.is_empty() {
        let constraints = route_options
            .constraints
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        options.insert("constraints".to_string(), Value::Object(constraints));
    }
    if !route_options.defaults.is_empty() {
        options.insert(
            "defaults".to_string(),
            Value::Object(route_options.defaults.clone()),
        );
    }
    options
}
