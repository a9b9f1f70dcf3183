use std::fmt;

/// Errors raised while building the route tree or assembling URIs.
///
/// Matching never fails with an error: a request that matches nothing yields
/// `None` from [`TreeRouteStack::match_request`](crate::TreeRouteStack::match_request).
#[derive(Debug)]
pub enum StackError {
    /// The config's `type` is not one of the known route types
    UnknownRouteType {
        /// Name the route was registered under
        route: String,
        /// The offending `type` value
        route_type: String,
    },
    /// A required key is absent from the route config
    MissingOption {
        /// Name the route was registered under
        route: String,
        /// The missing key (e.g. `type`, `route`, `verb`)
        option: &'static str,
    },
    /// A key is present but has the wrong shape
    InvalidOption {
        /// Name the route was registered under
        route: String,
        /// The offending key
        option: &'static str,
        /// What was expected
        reason: String,
    },
    /// A segment route definition could not be parsed
    InvalidPattern {
        /// The route definition (e.g. `/foo[/:id`)
        pattern: String,
        /// Parser diagnostic
        reason: String,
    },
    /// A constraint or regex route failed to compile
    InvalidRegex {
        /// The full pattern handed to the regex engine
        pattern: String,
        /// Underlying compile error
        source: regex::Error,
    },
    /// No route is registered under the requested name
    RouteNotFound {
        /// Requested route name
        name: String,
    },
    /// A required parameter was not supplied during assembly
    MissingParameter {
        /// Parameter name
        name: String,
    },
    /// A route with child routes was assembled without naming a child and may not terminate
    NonTerminatingRoute {
        /// Route name
        name: String,
    },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::UnknownRouteType { route, route_type } => {
                write!(f, "route '{route}': unknown route type '{route_type}'")
            }
            StackError::MissingOption { route, option } => {
                write!(f, "route '{route}': missing option '{option}'")
            }
            StackError::InvalidOption {
                route,
                option,
                reason,
            } => write!(f, "route '{route}': invalid option '{option}': {reason}"),
            StackError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route definition '{pattern}': {reason}")
            }
            StackError::InvalidRegex { pattern, source } => {
                write!(f, "invalid regex '{pattern}': {source}")
            }
            StackError::RouteNotFound { name } => write!(f, "route with name '{name}' not found"),
            StackError::MissingParameter { name } => write!(f, "missing parameter '{name}'"),
            StackError::NonTerminatingRoute { name } => {
                write!(f, "route '{name}' may not terminate; a child route name is required")
            }
        }
    }
}

impl std::error::Error for StackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StackError::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}
