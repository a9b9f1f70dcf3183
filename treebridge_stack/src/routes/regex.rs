use regex::Regex;
use serde_json::Value;

use super::{compile_anchored, decode, encode, param_value, RouteOptions};
use crate::error::StackError;
use crate::route_match::{Params, PartialMatch};

/// Matches a raw regex at the current offset
///
/// Named capture groups become parameters. Assembly substitutes `%name%`
/// placeholders in `spec`.
#[derive(Debug, Clone)]
pub(crate) struct RegexRoute {
    regex: Regex,
    spec: String,
    defaults: Params,
}

impl RegexRoute {
    pub(crate) fn from_options(options: &RouteOptions<'_>) -> Result<Self, StackError> {
        Ok(Self {
            regex: compile_anchored(options.required_str("regex")?)?,
            spec: options.required_str("spec")?.to_string(),
            defaults: options.defaults()?,
        })
    }

    pub(crate) fn match_at(&self, path: &str, offset: usize) -> Option<PartialMatch> {
        let rest = path.get(offset..)?;
        let caps = self.regex.captures(rest)?;
        let whole = caps.get(0)?;

        let mut params = self.defaults.clone();
        for name in self.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                params.insert(name.to_string(), Value::String(decode(m.as_str())));
            }
        }

        Some(PartialMatch::new(whole.end(), params))
    }

    pub(crate) fn assemble(&self, params: &Params) -> String {
        let mut merged = self.defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut url = self.spec.clone();
        for (key, value) in &merged {
            let placeholder = format!("%{key}%");
            if !url.contains(&placeholder) {
                continue;
            }
            if let Some(value) = param_value(value) {
                url = url.replace(&placeholder, &encode(&value));
            }
        }
        url
    }
}
