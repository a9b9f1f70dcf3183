//! # Route Tables
//!
//! Routes can be declared in a YAML (or JSON, by file extension) table
//! instead of code:
//!
//! ```yaml
//! routes:
//!   - path: /foo/:id
//!     middleware: foo
//!     methods: [GET]        # omit, or use "*", for any method
//!     name: foo             # optional, defaults to path^METHODS
//!     options:
//!       constraints: { id: '\d+' }
//!       defaults: { bar: baz }
//! ```
//!
//! Routes are registered in table order, which matters when several
//! registrations share a path.

use anyhow::{bail, Context, Result};
use http::Method;
use serde::Deserialize;
use std::path::Path;

use crate::adapter::TreeRouter;
use crate::route::{HttpMethods, Route, RouteOptions};

/// Top-level document of a route table file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// One entry of a route table
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDefinition {
    pub path: String,
    pub middleware: String,
    #[serde(default)]
    pub methods: Option<MethodsDefinition>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: RouteOptions,
}

/// `"*"` / `"any"`, a comma separated string, or a list of method names
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MethodsDefinition {
    Single(String),
    List(Vec<String>),
}

impl MethodsDefinition {
    fn to_methods(&self) -> Result<HttpMethods> {
        let names: Vec<&str> = match self {
            MethodsDefinition::Single(s) => {
                let s = s.trim();
                if s == "*" || s.eq_ignore_ascii_case("any") {
                    return Ok(HttpMethods::Any);
                }
                s.split(',').map(str::trim).collect()
            }
            MethodsDefinition::List(list) => list.iter().map(|s| s.trim()).collect(),
        };

        let mut methods = Vec::with_capacity(names.len());
        for name in names {
            if name.is_empty() {
                bail!("empty HTTP method name");
            }
            let method = Method::from_bytes(name.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid HTTP method '{name}'"))?;
            methods.push(method);
        }
        Ok(HttpMethods::only(methods))
    }
}

impl RouteDefinition {
    pub fn to_route(&self) -> Result<Route> {
        let methods = match &self.methods {
            None => HttpMethods::Any,
            Some(def) => def
                .to_methods()
                .with_context(|| format!("route '{}'", self.path))?,
        };
        let mut route = Route::new(self.path.clone(), self.middleware.clone(), methods)
            .with_options(self.options.clone());
        if let Some(name) = &self.name {
            route = route.with_name(name.clone());
        }
        Ok(route)
    }
}

impl RouteTable {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("failed to parse YAML route table")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse JSON route table")
    }

    /// Load a table; `.json` files are read as JSON, everything else as YAML
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let table = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        table.with_context(|| format!("invalid route table {}", path.display()))
    }

    pub fn to_routes(&self) -> Result<Vec<Route>> {
        self.routes.iter().map(RouteDefinition::to_route).collect()
    }
}

/// Build a [`TreeRouter`] from the table at `path`
pub fn load_router(path: &Path) -> Result<TreeRouter> {
    let routes = RouteTable::from_path(path)?.to_routes()?;
    let mut router = TreeRouter::new();
    router
        .add_routes(&routes)
        .with_context(|| format!("failed to register routes from {}", path.display()))?;
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_forms() {
        let table = RouteTable::from_yaml_str(
            r#"
routes:
  - { path: /a, middleware: a }
  - { path: /b, middleware: b, methods: "*" }
  - { path: /c, middleware: c, methods: "get, post" }
  - { path: /d, middleware: d, methods: [delete, PUT, delete] }
"#,
        )
        .unwrap();
        let routes = table.to_routes().unwrap();

        assert_eq!(routes[0].allowed_methods(), &HttpMethods::Any);
        assert_eq!(routes[1].allowed_methods(), &HttpMethods::Any);
        assert_eq!(
            routes[2].allowed_methods(),
            &HttpMethods::Only(vec![Method::GET, Method::POST])
        );
        assert_eq!(
            routes[3].allowed_methods(),
            &HttpMethods::Only(vec![Method::DELETE, Method::PUT])
        );
        assert_eq!(routes[3].name(), "/d^DELETE:PUT");
    }

    #[test]
    fn test_options_and_name() {
        let table = RouteTable::from_yaml_str(
            r#"
routes:
  - path: /foo/:id
    middleware: foo
    methods: [GET]
    name: foo
    options:
      constraints: { id: '\d+' }
      defaults: { bar: baz }
"#,
        )
        .unwrap();
        let route = table.routes[0].to_route().unwrap();
        assert_eq!(route.name(), "foo");
        assert_eq!(route.options().constraints["id"], r"\d+");
        assert_eq!(route.options().defaults["bar"], "baz");
    }

    #[test]
    fn test_invalid_method_is_reported() {
        let table = RouteTable::from_yaml_str(
            "routes:\n  - { path: /x, middleware: x, methods: [\"GE T\"] }\n",
        )
        .unwrap();
        let err = table.to_routes().unwrap_err();
        assert!(format!("{err:#}").contains("route '/x'"));
    }

    #[test]
    fn test_json_table() {
        let table = RouteTable::from_json_str(
            r#"{ "routes": [ { "path": "/j", "middleware": "j", "methods": ["GET"] } ] }"#,
        )
        .unwrap();
        assert_eq!(table.to_routes().unwrap()[0].name(), "/j^GET");
    }
}
