use http::{Method, Request};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use treebridge_stack::{Params, StackError, TreeRouteStack};

use super::config::{route_config, METHOD_NOT_ALLOWED_ROUTE, MIDDLEWARE_PARAM};
use super::request::to_stack_request;
use super::stack::RouteStack;
use crate::result::RouteResult;
use crate::route::{HttpMethods, Route};

/// Routes requests through a tree router and reports [`RouteResult`]s
///
/// Routes are added once at startup; matching and URI generation only read.
///
/// # Example
///
/// ```rust
/// use http::{Method, Request};
/// use treebridge::{Route, TreeRouter};
///
/// let mut router = TreeRouter::new();
/// router.add_route(&Route::new("/foo", "foo", Method::GET)).unwrap();
///
/// let request = Request::get("/foo").body(()).unwrap();
/// let result = router.match_request(&request);
/// assert_eq!(result.matched_route_name(), Some("/foo^GET"));
/// assert_eq!(result.matched_middleware(), Some("foo"));
///
/// let request = Request::post("/foo").body(()).unwrap();
/// let result = router.match_request(&request);
/// assert!(result.is_method_failure());
/// assert_eq!(result.allowed_methods(), &[Method::GET]);
/// ```
#[derive(Debug)]
pub struct TreeRouter<S = TreeRouteStack> {
    stack: S,
    /// Live routes in registration order; re-registering a name replaces it
    routes: Vec<Route>,
    /// Path to the route name whose stack entry carries the path's fallback
    fallback_owners: HashMap<String, String>,
    /// Route name to the stack name used for assembly
    assemble_names: HashMap<String, String>,
    /// Stack matched name to route name
    route_names: HashMap<String, String>,
    /// Route name to middleware, for matches whose params carry none
    middleware: HashMap<String, String>,
    /// Union of restricted methods per path
    allowed_methods_by_path: HashMap<String, Vec<Method>>,
}

impl TreeRouter<TreeRouteStack> {
    /// Adapter over a fresh, empty [`TreeRouteStack`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_stack(TreeRouteStack::new())
    }
}

impl Default for TreeRouter<TreeRouteStack> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RouteStack> TreeRouter<S> {
    #[must_use]
    pub fn with_stack(stack: S) -> Self {
        Self {
            stack,
            routes: Vec::new(),
            fallback_owners: HashMap::new(),
            assemble_names: HashMap::new(),
            route_names: HashMap::new(),
            middleware: HashMap::new(),
            allowed_methods_by_path: HashMap::new(),
        }
    }

    /// The wrapped router
    #[must_use]
    pub fn stack(&self) -> &S {
        &self.stack
    }

    /// Register `route` with the stack under the route's name
    ///
    /// Each path keeps a single method-not-allowed fallback, owned by one
    /// registration. Later registrations of the path are sent without one:
    /// the stack tries later routes first, and a second fallback would hide
    /// the earlier route's methods. The allowed methods reported for the path
    /// are the union over every live registration.
    ///
    /// Registering a name again replaces the earlier route, in the stack and
    /// here. If the replaced route owned a fallback it no longer provides,
    /// another live registration of that path is re-sent with the fallback.
    pub fn add_route(&mut self, route: &Route) -> Result<(), StackError> {
        let name = route.name();
        let path = route.path();
        let restricted = !route.allows_any_method();

        let keep_fallback = restricted
            && !matches!(self.fallback_owners.get(path), Some(owner) if owner != name);
        let mut config = route_config(route);
        if !keep_fallback {
            if let Some(Value::Object(children)) = config.get_mut("child_routes") {
                children.remove(METHOD_NOT_ALLOWED_ROUTE);
            }
        }

        self.stack.add_route(name, config)?;

        let index = self.routes.iter().position(|r| r.name() == name);
        let replaced = index.map(|index| self.routes.remove(index));
        self.routes.push(route.clone());
        if keep_fallback {
            self.fallback_owners
                .insert(path.to_string(), name.to_string());
        }
        self.reindex();
        if let Some(replaced) = &replaced {
            let old_path = replaced.path();
            let orphaned = old_path != path || !keep_fallback;
            let owned = self.fallback_owners.get(old_path).map(String::as_str) == Some(name);
            if orphaned && owned {
                self.fallback_owners.remove(old_path);
                self.rehome_fallback(old_path)?;
            }
        }

        info!(
            route_name = %name,
            path = %path,
            methods = %route.allowed_methods(),
            middleware = %route.middleware(),
            owns_fallback = keep_fallback,
            replaced = replaced.is_some(),
            "Route registered"
        );
        Ok(())
    }

    /// Re-send the latest live restricted route on `path` with its fallback
    fn rehome_fallback(&mut self, path: &str) -> Result<(), StackError> {
        let Some(owner) = self
            .routes
            .iter()
            .rev()
            .find(|r| r.path() == path && !r.allows_any_method())
        else {
            return Ok(());
        };
        self.stack.add_route(owner.name(), route_config(owner))?;
        debug!(route_name = %owner.name(), path = %path, "Fallback moved");
        self.fallback_owners
            .insert(path.to_string(), owner.name().to_string());
        Ok(())
    }

    /// Rebuild the name, middleware and method maps from the live routes
    fn reindex(&mut self) {
        self.assemble_names.clear();
        self.route_names.clear();
        self.middleware.clear();
        self.allowed_methods_by_path.clear();

        for route in &self.routes {
            let name = route.name();
            match route.allowed_methods() {
                HttpMethods::Any => {
                    self.assemble_names.insert(name.to_string(), name.to_string());
                    self.route_names.insert(name.to_string(), name.to_string());
                }
                HttpMethods::Only(methods) => {
                    let assemble_name = match methods.first() {
                        Some(first) => format!("{name}/{first}"),
                        None => name.to_string(),
                    };
                    self.assemble_names.insert(name.to_string(), assemble_name);
                    for method in methods {
                        self.route_names
                            .insert(format!("{name}/{method}"), name.to_string());
                    }

                    let allowed = self
                        .allowed_methods_by_path
                        .entry(route.path().to_string())
                        .or_default();
                    for method in methods {
                        if !allowed.contains(method) {
                            allowed.push(method.clone());
                        }
                    }
                }
            }
            self.middleware
                .insert(name.to_string(), route.middleware().to_string());
        }
    }

    /// Register every route in order, stopping at the first stack error
    pub fn add_routes<'a, I>(&mut self, routes: I) -> Result<(), StackError>
    where
        I: IntoIterator<Item = &'a Route>,
    {
        for route in routes {
            self.add_route(route)?;
        }
        Ok(())
    }

    /// Match `request` against the registered routes
    #[must_use]
    pub fn match_request<B>(&self, request: &Request<B>) -> RouteResult {
        let stack_request = to_stack_request(request);
        debug!(
            method = %stack_request.method(),
            path = %stack_request.path(),
            "Route match attempt"
        );

        let Some(matched) = self.stack.match_request(&stack_request) else {
            warn!(
                method = %stack_request.method(),
                path = %stack_request.path(),
                "No route matched"
            );
            return RouteResult::from_route_failure();
        };

        if let Some(path) = matched.params.get(METHOD_NOT_ALLOWED_ROUTE) {
            let allowed = path
                .as_str()
                .and_then(|p| self.allowed_methods_by_path.get(p))
                .cloned()
                .unwrap_or_default();
            warn!(
                method = %stack_request.method(),
                path = %stack_request.path(),
                route_path = %path,
                allowed_methods = ?allowed,
                "Method not allowed"
            );
            return RouteResult::from_method_failure(allowed);
        }

        let route_name = self
            .route_names
            .get(&matched.matched_route_name)
            .cloned()
            .unwrap_or_else(|| matched.matched_route_name.clone());

        let middleware = match matched.params.get(MIDDLEWARE_PARAM) {
            Some(Value::String(m)) => Some(m.clone()),
            _ => self.middleware.get(&route_name).cloned(),
        };
        let Some(middleware) = middleware else {
            warn!(
                route_name = %route_name,
                path = %stack_request.path(),
                "Matched route has no middleware"
            );
            return RouteResult::from_route_failure();
        };

        info!(
            method = %stack_request.method(),
            path = %stack_request.path(),
            route_name = %route_name,
            middleware = %middleware,
            "Route matched"
        );
        RouteResult::from_route_match(route_name, middleware, matched.params)
    }

    /// Generate the path of the route called `name`
    ///
    /// Unknown names and missing required substitutions surface the stack's
    /// error.
    pub fn generate_uri(&self, name: &str, substitutions: &Params) -> Result<String, StackError> {
        let target = self
            .assemble_names
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        let uri = self.stack.assemble(substitutions, target)?;
        debug!(route_name = %name, uri = %uri, "URI generated");
        Ok(uri)
    }

    /// Methods registered for `path`, `None` for unknown or any-method paths
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Option<&[Method]> {
        self.allowed_methods_by_path.get(path).map(Vec::as_slice)
    }
}
