//! Segment routes: `/users/:id[/:format]`.
//!
//! A definition is made of literal text, `:name` parameters and optional
//! `[...]` groups, which may nest. A parameter name runs until one of
//! `: / { [ ]`; an optional `{delims}` directly after the name lists the
//! characters the value may not contain (default `/`). A single `:` right
//! after a name terminates it, so `:a:-x` is parameter `a` followed by `-x`.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use super::{compile_anchored, decode, encode, param_value, RouteOptions};
use crate::error::StackError;
use crate::route_match::{Params, PartialMatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Literal(String),
    Parameter {
        name: String,
        delimiters: Option<String>,
    },
    Optional(Vec<Part>),
}

#[derive(Debug, Clone)]
pub(crate) struct SegmentRoute {
    parts: Vec<Part>,
    regex: Regex,
    /// (capture group name, parameter name), in definition order
    groups: Vec<(String, String)>,
    defaults: Params,
}

impl SegmentRoute {
    pub(crate) fn from_options(options: &RouteOptions<'_>) -> Result<Self, StackError> {
        let definition = options.required_str("route")?;
        let constraints = options.constraints()?;
        let defaults = options.defaults()?;
        Self::new(definition, &constraints, defaults)
    }

    pub(crate) fn new(
        definition: &str,
        constraints: &HashMap<String, String>,
        defaults: Params,
    ) -> Result<Self, StackError> {
        let parts = parse_definition(definition)?;
        let mut groups = Vec::new();
        let pattern = build_regex(&parts, constraints, &mut groups);
        let regex = compile_anchored(&pattern)?;

        Ok(Self {
            parts,
            regex,
            groups,
            defaults,
        })
    }

    pub(crate) fn match_at(&self, path: &str, offset: usize) -> Option<PartialMatch> {
        let rest = path.get(offset..)?;
        let caps = self.regex.captures(rest)?;
        let whole = caps.get(0)?;

        let mut params = self.defaults.clone();
        for (group, name) in &self.groups {
            if let Some(m) = caps.name(group) {
                params.insert(name.clone(), Value::String(decode(m.as_str())));
            }
        }

        Some(PartialMatch::new(whole.end(), params))
    }

    pub(crate) fn assemble(&self, params: &Params) -> Result<String, StackError> {
        let mut merged = self.defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.build_path(&self.parts, &merged, false)
    }

    /// An optional group is emitted only when every parameter in it is
    /// available and at least one differs from its default.
    fn build_path(
        &self,
        parts: &[Part],
        merged: &Params,
        is_optional: bool,
    ) -> Result<String, StackError> {
        let mut path = String::new();
        let mut skippable = true;

        for part in parts {
            match part {
                Part::Literal(literal) => path.push_str(literal),
                Part::Parameter { name, .. } => {
                    let Some(value) = merged.get(name).and_then(param_value) else {
                        if is_optional {
                            return Ok(String::new());
                        }
                        return Err(StackError::MissingParameter { name: name.clone() });
                    };
                    if !is_optional || self.defaults.get(name) != merged.get(name) {
                        skippable = false;
                    }
                    path.push_str(&encode(&value));
                }
                Part::Optional(inner) => {
                    let segment = self.build_path(inner, merged, true)?;
                    if !segment.is_empty() {
                        path.push_str(&segment);
                        skippable = false;
                    }
                }
            }
        }

        if is_optional && skippable {
            Ok(String::new())
        } else {
            Ok(path)
        }
    }
}

pub(crate) fn parse_definition(definition: &str) -> Result<Vec<Part>, StackError> {
    let invalid = |reason: &str| StackError::InvalidPattern {
        pattern: definition.to_string(),
        reason: reason.to_string(),
    };

    // Innermost group last; the bottom entry is the top level
    let mut levels: Vec<Vec<Part>> = vec![Vec::new()];
    let mut literal = String::new();
    let mut chars = definition.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' => {
                flush_literal(&mut literal, &mut levels);
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if matches!(n, ':' | '/' | '{' | '[' | ']') {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(invalid("found empty parameter name"));
                }

                let mut delimiters = None;
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut list = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(d) => list.push(d),
                            None => return Err(invalid("unterminated delimiter list")),
                        }
                    }
                    if list.is_empty() {
                        return Err(invalid("found empty delimiter list"));
                    }
                    delimiters = Some(list);
                }
                if chars.peek() == Some(&':') {
                    chars.next();
                }

                push_part(&mut levels, Part::Parameter { name, delimiters });
            }
            '[' => {
                flush_literal(&mut literal, &mut levels);
                levels.push(Vec::new());
            }
            ']' => {
                flush_literal(&mut literal, &mut levels);
                if levels.len() < 2 {
                    return Err(invalid("found closing bracket without matching opening bracket"));
                }
                let group = levels.pop().unwrap_or_default();
                push_part(&mut levels, Part::Optional(group));
            }
            '{' => return Err(invalid("translated literals are not supported")),
            _ => literal.push(c),
        }
    }

    flush_literal(&mut literal, &mut levels);
    if levels.len() != 1 {
        return Err(invalid("found unbalanced brackets"));
    }
    Ok(levels.pop().unwrap_or_default())
}

fn flush_literal(literal: &mut String, levels: &mut [Vec<Part>]) {
    if literal.is_empty() {
        return;
    }
    if let Some(current) = levels.last_mut() {
        current.push(Part::Literal(std::mem::take(literal)));
    }
}

fn push_part(levels: &mut [Vec<Part>], part: Part) {
    if let Some(current) = levels.last_mut() {
        current.push(part);
    }
}

fn build_regex(
    parts: &[Part],
    constraints: &HashMap<String, String>,
    groups: &mut Vec<(String, String)>,
) -> String {
    let mut pattern = String::new();
    for part in parts {
        match part {
            Part::Literal(literal) => pattern.push_str(&regex::escape(literal)),
            Part::Parameter { name, delimiters } => {
                let group = format!("p{}", groups.len());
                let value = match (constraints.get(name), delimiters) {
                    (Some(constraint), _) => constraint.clone(),
                    (None, Some(delims)) => format!("[^{}]+", escape_class(delims)),
                    (None, None) => "[^/]+".to_string(),
                };
                pattern.push_str(&format!("(?P<{group}>{value})"));
                groups.push((group, name.clone()));
            }
            Part::Optional(inner) => {
                pattern.push_str("(?:");
                pattern.push_str(&build_regex(inner, constraints, groups));
                pattern.push_str(")?");
            }
        }
    }
    pattern
}

/// Escape characters that are special inside a regex character class
fn escape_class(chars: &str) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for c in chars.chars() {
        if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
