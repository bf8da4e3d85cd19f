//! Route template compilation
//!
//! Turns templates like `/users/:id/:slug/` into anchored regular expressions
//! plus the ordered list of placeholder names.
//!
//! # Syntax
//!
//! - `:name` is a placeholder, where `name` is one or more of `[A-Za-z0-9_]`
//! - Everything else is literal and matches itself exactly (`.` is a dot)
//! - A placeholder accepts one or more of `[A-Za-z0-9_-]`
//!
//! Placeholder names are scanned greedily, so `:a:b` is two placeholders but
//! `:ab` is one. Two placeholders need a non-word character between them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Params, RouterError};

/// Matches `:name` tokens in a route template
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z0-9_]+)").expect("placeholder regex is valid"));

/// Capture group substituted for every placeholder
pub const SEGMENT: &str = "([A-Za-z0-9_-]+)";

/// A compiled route template
///
/// Immutable once built. The matcher is anchored at both ends, so a path with
/// trailing content, a missing literal, or a disallowed character in a
/// placeholder position never matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Regex,
    param_keys: Vec<String>,
}

impl Pattern {
    /// Compiles a route template
    ///
    /// # Examples
    ///
    /// ```
    /// use rmvc_router::Pattern;
    ///
    /// let pattern = Pattern::compile("/users/:id/:slug/").unwrap();
    /// assert_eq!(pattern.param_keys(), ["id", "slug"]);
    /// assert!(pattern.is_match("/users/200/oliver-c/"));
    /// assert!(!pattern.is_match("/users/200/oliver-c/extra/"));
    /// ```
    pub fn compile(template: &str) -> Result<Self, RouterError> {
        let mut regex_source = String::with_capacity(template.len() + 16);
        let mut param_keys = Vec::new();
        let mut last = 0;

        regex_source.push('^');

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            regex_source.push_str(&regex::escape(&template[last..token.start()]));
            regex_source.push_str(SEGMENT);
            param_keys.push(name.as_str().to_string());
            last = token.end();
        }

        regex_source.push_str(&regex::escape(&template[last..]));
        regex_source.push('$');

        let matcher = Regex::new(&regex_source).map_err(|source| RouterError::InvalidPattern {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            source: template.to_string(),
            matcher,
            param_keys,
        })
    }

    /// The template this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchored matcher
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Placeholder names in template order, duplicates included
    pub fn param_keys(&self) -> &[String] {
        &self.param_keys
    }

    /// Whether the template has no placeholders
    pub fn is_static(&self) -> bool {
        self.param_keys.is_empty()
    }

    /// Tests a path against the whole-string matcher
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Captures placeholder values from `path`
    ///
    /// Values are zipped with [`Pattern::param_keys`] by position, never by
    /// name, so a template with a repeated name still yields one entry per
    /// capture.
    pub fn extract(&self, path: &str) -> Option<Params> {
        let caps = self.matcher.captures(path)?;

        let params = self
            .param_keys
            .iter()
            .zip(caps.iter().skip(1))
            .map(|(key, value)| {
                let value = value.map_or("", |m| m.as_str());
                (key.clone(), value.to_string())
            })
            .collect();

        Some(params)
    }

    /// Rebuilds a URL from the original template
    ///
    /// Each placeholder is replaced, in order, by whatever `lookup` returns
    /// for its name. The first name `lookup` cannot resolve is returned as
    /// the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rmvc_router::Pattern;
    ///
    /// let pattern = Pattern::compile("/users/:id/").unwrap();
    /// let url = pattern.substitute(|key| (key == "id").then_some("42"));
    /// assert_eq!(url, Ok("/users/42/".to_string()));
    ///
    /// let missing = pattern.substitute(|_| None);
    /// assert_eq!(missing, Err("id".to_string()));
    /// ```
    pub fn substitute<'v, F>(&self, mut lookup: F) -> Result<String, String>
    where
        F: FnMut(&str) -> Option<&'v str>,
    {
        let mut url = String::with_capacity(self.source.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            url.push_str(&self.source[last..token.start()]);

            let value = lookup(name.as_str()).ok_or_else(|| name.as_str().to_string())?;
            url.push_str(value);

            last = token.end();
        }

        url.push_str(&self.source[last..]);
        Ok(url)
    }
}
