use super::RouteOptions;
use crate::error::StackError;
use crate::route_match::{Params, PartialMatch};

/// Matches an exact piece of path text
#[derive(Debug, Clone)]
pub(crate) struct LiteralRoute {
    route: String,
    defaults: Params,
}

impl LiteralRoute {
    pub(crate) fn from_options(options: &RouteOptions<'_>) -> Result<Self, StackError> {
        Ok(Self {
            route: options.required_str("route")?.to_string(),
            defaults: options.defaults()?,
        })
    }

    pub(crate) fn match_at(&self, path: &str, offset: usize) -> Option<PartialMatch> {
        let rest = path.get(offset..)?;
        rest.starts_with(self.route.as_str())
            .then(|| PartialMatch::new(self.route.len(), self.defaults.clone()))
    }

    pub(crate) fn assemble(&self) -> String {
        self.route.clone()
    }
}
