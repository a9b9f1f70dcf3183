//! Route types understood by the stack.
//!
//! Each type matches at a byte offset into the request path and reports how
//! many bytes it consumed. Only top-level routes must consume the whole path;
//! child routes continue where their parent stopped.
//!
//! | `type`    | consumes                    | options                                  |
//! |-----------|-----------------------------|------------------------------------------|
//! | `segment` | pattern with `:params`      | `route`, `constraints`, `defaults`       |
//! | `literal` | exact text                  | `route`, `defaults`                      |
//! | `method`  | nothing, checks HTTP verb   | `verb`, `defaults`                       |
//! | `regex`   | regex anchored at offset    | `regex`, `spec`, `defaults`              |

mod literal;
mod method;
mod regex;
mod segment;

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::StackError;
use crate::request::StackRequest;
use crate::route_match::{Params, PartialMatch};

pub(crate) use self::literal::LiteralRoute;
pub(crate) use self::method::MethodRoute;
pub(crate) use self::regex::RegexRoute;
pub(crate) use self::segment::SegmentRoute;

/// A single route level, without children
#[derive(Debug, Clone)]
pub(crate) enum RouteKind {
    Segment(SegmentRoute),
    Literal(LiteralRoute),
    Method(MethodRoute),
    Regex(RegexRoute),
}

impl RouteKind {
    /// Build a route from its `type` tag and `options` object
    pub(crate) fn from_config(
        route: &str,
        route_type: &str,
        options: &Map<String, Value>,
    ) -> Result<Self, StackError> {
        let options = RouteOptions { route, options };
        match route_type.to_ascii_lowercase().as_str() {
            "segment" => SegmentRoute::from_options(&options).map(RouteKind::Segment),
            "literal" => LiteralRoute::from_options(&options).map(RouteKind::Literal),
            "method" => MethodRoute::from_options(&options).map(RouteKind::Method),
            "regex" => RegexRoute::from_options(&options).map(RouteKind::Regex),
            _ => Err(StackError::UnknownRouteType {
                route: route.to_string(),
                route_type: route_type.to_string(),
            }),
        }
    }

    pub(crate) fn match_at(&self, request: &StackRequest, offset: usize) -> Option<PartialMatch> {
        match self {
            RouteKind::Segment(r) => r.match_at(request.path(), offset),
            RouteKind::Literal(r) => r.match_at(request.path(), offset),
            RouteKind::Method(r) => r.match_request(request),
            RouteKind::Regex(r) => r.match_at(request.path(), offset),
        }
    }

    pub(crate) fn assemble(&self, params: &Params) -> Result<String, StackError> {
        match self {
            RouteKind::Segment(r) => r.assemble(params),
            RouteKind::Literal(r) => Ok(r.assemble()),
            RouteKind::Method(_) => Ok(String::new()),
            RouteKind::Regex(r) => Ok(r.assemble(params)),
        }
    }
}

/// Typed access to a route's `options` object
pub(crate) struct RouteOptions<'a> {
    route: &'a str,
    options: &'a Map<String, Value>,
}

impl<'a> RouteOptions<'a> {
    pub(crate) fn route_name(&self) -> &str {
        self.route
    }

    pub(crate) fn required_str(&self, key: &'static str) -> Result<&'a str, StackError> {
        match self.options.get(key) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(self.invalid(key, "expected a string")),
            None => Err(StackError::MissingOption {
                route: self.route.to_string(),
                option: key,
            }),
        }
    }

    pub(crate) fn defaults(&self) -> Result<Params, StackError> {
        match self.options.get("defaults") {
            None | Some(Value::Null) => Ok(Params::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(self.invalid("defaults", "expected an object")),
        }
    }

    pub(crate) fn constraints(&self) -> Result<HashMap<String, String>, StackError> {
        let map = match self.options.get("constraints") {
            None | Some(Value::Null) => return Ok(HashMap::new()),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(self.invalid("constraints", "expected an object")),
        };
        map.iter()
            .map(|(name, value)| match value {
                Value::String(re) => Ok((name.clone(), re.clone())),
                _ => Err(self.invalid("constraints", "constraint values must be strings")),
            })
            .collect()
    }

    fn invalid(&self, option: &'static str, reason: &str) -> StackError {
        StackError::InvalidOption {
            route: self.route.to_string(),
            option,
            reason: reason.to_string(),
        }
    }
}

/// String form of a parameter value, `None` for null
pub(crate) fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Percent-decode a matched path value, keeping it raw when it is not valid UTF-8
pub(crate) fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Sub-delimiters and `:`/`@` that may stay literal inside a path segment
const SEGMENT_SAFE: [(&str, &str); 13] = [
    ("%21", "!"),
    ("%24", "$"),
    ("%26", "&"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
    ("%2B", "+"),
    ("%2C", ","),
    ("%3A", ":"),
    ("%3B", ";"),
    ("%3D", "="),
    ("%40", "@"),
];

/// Percent-encode a value for a path segment, leaving segment-safe characters as-is
pub(crate) fn encode(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, literal) in SEGMENT_SAFE {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}

/// Compile `pattern` anchored at the start of the haystack
pub(crate) fn compile_anchored(pattern: &str) -> Result<::regex::Regex, StackError> {
    let anchored = format!("^(?:{pattern})");
    ::regex::Regex::new(&anchored).map_err(|source| StackError::InvalidRegex {
        pattern: anchored,
        source,
    })
}
