use http::Method;

use super::RouteOptions;
use crate::error::StackError;
use crate::request::StackRequest;
use crate::route_match::{Params, PartialMatch};

/// Matches on the HTTP method only; consumes no path
#[derive(Debug, Clone)]
pub(crate) struct MethodRoute {
    verbs: Vec<Method>,
    defaults: Params,
}

impl MethodRoute {
    /// `verb` is a comma separated list, e.g. `GET,POST`
    pub(crate) fn from_options(options: &RouteOptions<'_>) -> Result<Self, StackError> {
        let verb = options.required_str("verb")?;
        let verbs = verb
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                Method::from_bytes(v.to_ascii_uppercase().as_bytes()).map_err(|_| {
                    StackError::InvalidOption {
                        route: options.route_name().to_string(),
                        option: "verb",
                        reason: format!("'{v}' is not an HTTP method"),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            verbs,
            defaults: options.defaults()?,
        })
    }

    pub(crate) fn match_request(&self, request: &StackRequest) -> Option<PartialMatch> {
        self.verbs
            .contains(request.method())
            .then(|| PartialMatch::new(0, self.defaults.clone()))
    }
}
