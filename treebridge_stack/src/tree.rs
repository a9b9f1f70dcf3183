use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::StackError;
use crate::priority::PriorityList;
use crate::request::StackRequest;
use crate::route_match::{join_name, Params, PartialMatch, StackMatch};
use crate::routes::RouteKind;

/// A route plus its child routes
///
/// A node without children always terminates. A node with children matches
/// its own prefix and hands the rest of the path to the first child that
/// consumes it completely; it may also end the match itself when
/// `may_terminate` is set.
#[derive(Debug, Clone)]
pub(crate) struct RouteNode {
    kind: RouteKind,
    may_terminate: bool,
    children: PriorityList,
}

impl RouteNode {
    /// Parse a route config; returns the node and its priority
    pub(crate) fn from_config(name: &str, config: &Value) -> Result<(Self, i64), StackError> {
        let Value::Object(config) = config else {
            return Err(StackError::InvalidOption {
                route: name.to_string(),
                option: "type",
                reason: "route config must be an object".to_string(),
            });
        };

        let route_type = match config.get("type") {
            Some(Value::String(t)) => t.as_str(),
            Some(_) => return Err(invalid(name, "type", "expected a string")),
            None => {
                return Err(StackError::MissingOption {
                    route: name.to_string(),
                    option: "type",
                })
            }
        };

        let empty = Map::new();
        let options = match config.get("options") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(options)) => options,
            Some(_) => return Err(invalid(name, "options", "expected an object")),
        };

        let priority = match config.get("priority") {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| invalid(name, "priority", "expected an integer"))?,
        };

        let kind = RouteKind::from_config(name, route_type, options)?;

        let mut children = PriorityList::default();
        match config.get("child_routes") {
            None | Some(Value::Null) => {}
            Some(Value::Object(child_routes)) => {
                for (child_name, child_config) in child_routes {
                    let qualified = join_name(name, Some(child_name));
                    let (child, child_priority) = RouteNode::from_config(&qualified, child_config)?;
                    children.insert(child_name, child_priority, child);
                }
            }
            Some(_) => return Err(invalid(name, "child_routes", "expected an object")),
        }

        let may_terminate = if children.is_empty() {
            true
        } else {
            match config.get("may_terminate") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(b)) => *b,
                Some(_) => return Err(invalid(name, "may_terminate", "expected a boolean")),
            }
        };

        Ok((
            Self {
                kind,
                may_terminate,
                children,
            },
            priority,
        ))
    }

    fn match_at(&self, request: &StackRequest, offset: usize) -> Option<PartialMatch> {
        let own = self.kind.match_at(request, offset)?;
        if self.children.is_empty() {
            return Some(own);
        }

        let path_len = request.path().len();
        let next = offset + own.length;
        if self.may_terminate && next == path_len {
            return Some(own);
        }

        self.children.iter().find_map(|entry| {
            let child = entry.node.match_at(request, next)?;
            (next + child.length == path_len).then(|| own.clone().merge_child(&entry.name, child))
        })
    }

    fn assemble(
        &self,
        name: &str,
        params: &Params,
        child: Option<&str>,
    ) -> Result<String, StackError> {
        let mut path = self.kind.assemble(params)?;
        match child {
            None if !self.children.is_empty() && !self.may_terminate => {
                return Err(StackError::NonTerminatingRoute {
                    name: name.to_string(),
                });
            }
            None => {}
            Some(child_name) => {
                let (entry, rest) =
                    self.children
                        .resolve(child_name)
                        .ok_or_else(|| StackError::RouteNotFound {
                            name: join_name(name, Some(child_name)),
                        })?;
                let qualified = join_name(name, Some(&entry.name));
                path.push_str(&entry.node.assemble(&qualified, params, rest)?);
            }
        }
        Ok(path)
    }
}

fn invalid(route: &str, option: &'static str, reason: &str) -> StackError {
    StackError::InvalidOption {
        route: route.to_string(),
        option,
        reason: reason.to_string(),
    }
}

/// Tree of named routes built from configuration dictionaries
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use serde_json::json;
/// use treebridge_stack::{StackRequest, TreeRouteStack};
///
/// let mut stack = TreeRouteStack::new();
/// stack.add_route("user", &json!({
///     "type": "segment",
///     "options": { "route": "/users/:id", "constraints": { "id": "\\d+" } },
/// })).unwrap();
///
/// let m = stack.match_request(&StackRequest::new(Method::GET, "/users/42")).unwrap();
/// assert_eq!(m.matched_route_name, "user");
/// assert_eq!(m.params["id"], "42");
///
/// let mut params = serde_json::Map::new();
/// params.insert("id".into(), json!("7"));
/// assert_eq!(stack.assemble(&params, "user").unwrap(), "/users/7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeRouteStack {
    routes: PriorityList,
}

impl TreeRouteStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route under `name`, replacing any existing route of that name
    pub fn add_route(&mut self, name: &str, config: &Value) -> Result<(), StackError> {
        let (node, priority) = RouteNode::from_config(name, config)?;
        info!(
            route_name = %name,
            priority,
            child_routes = node.children.len(),
            may_terminate = node.may_terminate,
            "Route added to stack"
        );
        self.routes.insert(name, priority, node);
        Ok(())
    }

    /// Register several routes, stopping at the first invalid config
    pub fn add_routes<'a, I>(&mut self, routes: I) -> Result<(), StackError>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        for (name, config) in routes {
            self.add_route(name, config)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn has_route(&self, name: &str) -> bool {
        self.routes.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Names of the top-level routes in match order
    #[must_use]
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(|e| e.name.as_str()).collect()
    }

    /// Match a request; the matched route must consume the whole path
    #[must_use]
    pub fn match_request(&self, request: &StackRequest) -> Option<StackMatch> {
        let path_len = request.path().len();
        let found = self.routes.iter().find_map(|entry| {
            let m = entry.node.match_at(request, 0)?;
            (m.length == path_len).then(|| {
                StackMatch::new(join_name(&entry.name, m.child_name.as_deref()), m.params)
            })
        });

        match &found {
            Some(m) => debug!(
                method = %request.method(),
                path = %request.path(),
                matched_route_name = %m.matched_route_name,
                "Stack matched"
            ),
            None => debug!(
                method = %request.method(),
                path = %request.path(),
                "Stack found no route"
            ),
        }
        found
    }

    /// Assemble the path of the route called `name` (`route/child/...`)
    pub fn assemble(&self, params: &Params, name: &str) -> Result<String, StackError> {
        let (entry, child) = self
            .routes
            .resolve(name)
            .ok_or_else(|| StackError::RouteNotFound {
                name: name.to_string(),
            })?;
        entry.node.assemble(&entry.name, params, child)
    }
}
