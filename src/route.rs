//! Router-agnostic route declarations.

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Joins allowed methods in a generated route name (`/foo^GET:POST`)
pub const HTTP_METHOD_SEPARATOR: char = ':';

/// HTTP methods a route answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethods {
    /// Every method is accepted; no method-not-allowed handling
    Any,
    /// Only the listed methods, in declaration order
    Only(Vec<Method>),
}

impl HttpMethods {
    /// Restrict to `methods`, dropping duplicates but keeping order
    #[must_use]
    pub fn only<I>(methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        let mut list: Vec<Method> = Vec::new();
        for method in methods {
            if !list.contains(&method) {
                list.push(method);
            }
        }
        HttpMethods::Only(list)
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, HttpMethods::Any)
    }

    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            HttpMethods::Any => true,
            HttpMethods::Only(list) => list.contains(method),
        }
    }
}

impl From<Method> for HttpMethods {
    fn from(method: Method) -> Self {
        HttpMethods::Only(vec![method])
    }
}

impl fmt::Display for HttpMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethods::Any => f.write_str("*"),
            HttpMethods::Only(list) => {
                for (i, method) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{HTTP_METHOD_SEPARATOR}")?;
                    }
                    f.write_str(method.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Per-route options handed through to the router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Parameter name to regex, e.g. `id: '\d+'`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, String>,
    /// Values reported for parameters the path does not supply
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub defaults: Map<String, Value>,
}

impl RouteOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.defaults.is_empty()
    }

    #[must_use]
    pub fn with_constraint(mut self, param: impl Into<String>, regex: impl Into<String>) -> Self {
        self.constraints.insert(param.into(), regex.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(param.into(), value.into());
        self
    }
}

/// A path pattern bound to a middleware for a set of HTTP methods
///
/// The middleware is referenced by name; resolving the name to something
/// callable is the dispatch layer's job.
///
/// Without an explicit name a route is named after its path, followed by
/// `^` and the method list when methods are restricted:
///
/// ```rust
/// use http::Method;
/// use treebridge::{HttpMethods, Route};
///
/// let route = Route::new("/foo", "foo", HttpMethods::only([Method::GET, Method::POST]));
/// assert_eq!(route.name(), "/foo^GET:POST");
///
/// let any = Route::new("/bar", "bar", HttpMethods::Any);
/// assert_eq!(any.name(), "/bar");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    path: String,
    middleware: String,
    methods: HttpMethods,
    name: String,
    options: RouteOptions,
}

impl Route {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        middleware: impl Into<String>,
        methods: impl Into<HttpMethods>,
    ) -> Self {
        let path = path.into();
        let methods = methods.into();
        let name = match &methods {
            HttpMethods::Any => path.clone(),
            HttpMethods::Only(_) => format!("{path}^{methods}"),
        };
        Self {
            path,
            middleware: middleware.into(),
            methods,
            name,
            options: RouteOptions::default(),
        }
    }

    /// Replace the generated name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn middleware(&self) -> &str {
        &self.middleware
    }

    #[must_use]
    pub fn allowed_methods(&self) -> &HttpMethods {
        &self.methods
    }

    #[must_use]
    pub fn allows_any_method(&self) -> bool {
        self.methods.is_any()
    }

    #[must_use]
    pub fn allows_method(&self, method: &Method) -> bool {
        self.methods.allows(method)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_are_deduplicated_in_order() {
        let methods = HttpMethods::only([Method::POST, Method::GET, Method::POST]);
        assert_eq!(methods, HttpMethods::Only(vec![Method::POST, Method::GET]));
        assert_eq!(methods.to_string(), "POST:GET");
    }

    #[test]
    fn test_explicit_name_wins() {
        let route = Route::new("/foo", "foo", Method::POST).with_name("foo-create");
        assert_eq!(route.name(), "foo-create");
        assert!(route.allows_method(&Method::POST));
        assert!(!route.allows_method(&Method::GET));
    }

    #[test]
    fn test_any_route_allows_everything() {
        let route = Route::new("/bar/:baz", "bar", HttpMethods::Any);
        assert!(route.allows_any_method());
        assert!(route.allows_method(&Method::PATCH));
        assert_eq!(route.allowed_methods().to_string(), "*");
    }

    #[test]
    fn test_options_builder() {
        let options = RouteOptions::default()
            .with_constraint("id", r"\d+")
            .with_default("bar", "baz");
        assert!(!options.is_empty());
        assert_eq!(options.constraints["id"], r"\d+");
        assert_eq!(options.defaults["bar"], "baz");
        assert!(RouteOptions::default().is_empty());
    }
}
