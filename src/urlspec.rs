//! Route patterns bound to a handler.
//!
//! A [`UrlSpec`](struct.UrlSpec.html) compiles its pattern with an implicit
//! trailing `$` and keeps a reversed, positional template of it where each
//! capturing group is replaced by a `%s` slot:
//!
//! ```rust
//! use apispec_urlspec::prelude::*;
//! use std::sync::Arc;
//!
//! let handler: Arc<dyn Handler> = Arc::new(HandlerDescriptor::new("UserHandler"));
//! let spec = UrlSpec::new(r"/users/(\d+)/?", handler).unwrap();
//! assert_eq!(spec.path_template(), Some("/users/%s/?"));
//! ```

use crate::{
    error::{ApiSpecError, Result},
    handler::Handler,
};
use regex::Regex;
use serde_yaml::Mapping;
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    sync::Arc,
};

/// A route pattern, the handler it dispatches to, and the extra arguments
/// given to that handler
#[derive(Clone)]
pub struct UrlSpec {
    regex: Regex,
    path_template: Option<String>,
    handler: Arc<dyn Handler>,
    kwargs: Mapping,
    name: Option<String>,
}

impl UrlSpec {
    /// Compile `pattern` and bind it to `handler`
    pub fn new(pattern: &str, handler: Arc<dyn Handler>) -> Result<UrlSpec> {
        Self::with_options(pattern, handler, Mapping::new(), None)
    }

    /// Compile `pattern` and bind it to `handler`, with extra handler
    /// arguments and a route name
    pub fn with_options(pattern: &str, handler: Arc<dyn Handler>, kwargs: Mapping, name: Option<String>) -> Result<UrlSpec> {
        let regex = if pattern.ends_with('$') {
            Regex::new(pattern)?
        } else {
            Regex::new(&format!("{}$", pattern))?
        };
        let path_template = reverse_template(&regex);
        if path_template.is_none() {
            debug!("Route pattern `{}` cannot be reversed into a path template", regex.as_str());
        }

        Ok(UrlSpec {
            regex,
            path_template,
            handler,
            kwargs,
            name,
        })
    }

    ///
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Positional template of the pattern, `None` when the pattern is too
    /// complex to be reversed
    pub fn path_template(&self) -> Option<&str> {
        self.path_template.as_deref()
    }

    ///
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    ///
    pub fn kwargs(&self) -> &Mapping {
        &self.kwargs
    }

    ///
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of capturing groups of the pattern
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Names of the named capturing groups, ascending by group index
    pub fn group_index(&self) -> Vec<(&str, usize)> {
        self.regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| name.map(|n| (n, index)))
            .collect()
    }
}

impl Display for UrlSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "UrlSpec({:?}, {}, kwargs={:?}, name={:?})",
            self.regex.as_str(),
            self.handler.name(),
            self.kwargs,
            self.name
        )
    }
}

impl Debug for UrlSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UrlSpec")
            .field("regex", &self.regex.as_str())
            .field("path_template", &self.path_template)
            .field("handler", &self.handler.name())
            .field("kwargs", &self.kwargs)
            .field("name", &self.name)
            .finish()
    }
}

/// The constructor arguments of a [`UrlSpec`](struct.UrlSpec.html), not yet
/// compiled
#[derive(Clone)]
pub struct RawUrlSpec {
    pattern: String,
    handler: Arc<dyn Handler>,
    kwargs: Mapping,
    name: Option<String>,
}

impl RawUrlSpec {
    ///
    pub fn new<S: Into<String>>(pattern: S, handler: Arc<dyn Handler>) -> Self {
        RawUrlSpec {
            pattern: pattern.into(),
            handler,
            kwargs: Mapping::new(),
            name: None,
        }
    }

    ///
    pub fn kwargs(mut self, kwargs: Mapping) -> Self {
        self.kwargs = kwargs;
        self
    }

    ///
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A route given either as an already built
/// [`UrlSpec`](struct.UrlSpec.html) or as its raw constructor arguments
#[derive(Clone)]
pub enum UrlSpecArg {
    ///
    Spec(UrlSpec),
    ///
    Raw(RawUrlSpec),
}

impl UrlSpecArg {
    /// Resolve into a compiled [`UrlSpec`](struct.UrlSpec.html)
    pub fn into_url_spec(self) -> Result<UrlSpec> {
        match self {
            UrlSpecArg::Spec(spec) => Ok(spec),
            UrlSpecArg::Raw(RawUrlSpec { pattern, handler, kwargs, name }) => UrlSpec::with_options(&pattern, handler, kwargs, name),
        }
    }
}

impl From<UrlSpec> for UrlSpecArg {
    fn from(spec: UrlSpec) -> Self {
        UrlSpecArg::Spec(spec)
    }
}

impl From<RawUrlSpec> for UrlSpecArg {
    fn from(raw: RawUrlSpec) -> Self {
        UrlSpecArg::Raw(raw)
    }
}

impl<S: Into<String>> From<(S, Arc<dyn Handler>)> for UrlSpecArg {
    fn from((pattern, handler): (S, Arc<dyn Handler>)) -> Self {
        UrlSpecArg::Raw(RawUrlSpec::new(pattern, handler))
    }
}

impl<S: Into<String>> From<(S, Arc<dyn Handler>, Mapping)> for UrlSpecArg {
    fn from((pattern, handler, kwargs): (S, Arc<dyn Handler>, Mapping)) -> Self {
        UrlSpecArg::Raw(RawUrlSpec::new(pattern, handler).kwargs(kwargs))
    }
}

/// Turn a pattern back into a template with a `%s` slot per capturing group.
///
/// Patterns with groups that cannot be located by a plain `(` lookup, like
/// non capturing groups or escaped parenthesis, and patterns whose literal
/// parts contain escaped alphanumerics are not reversible.
fn reverse_template(regex: &Regex) -> Option<String> {
    let pattern = regex.as_str();
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    let pattern = pattern.strip_suffix('$').unwrap_or(pattern);

    if regex.captures_len() - 1 != pattern.matches('(').count() {
        return None;
    }

    let mut template = String::with_capacity(pattern.len());
    for fragment in pattern.split('(') {
        match fragment.find(')') {
            Some(paren_loc) => {
                template.push_str("%s");
                template.push_str(&unescape(&fragment[paren_loc + 1..])?);
            }
            None => template.push_str(&unescape(fragment)?),
        }
    }

    Some(template)
}

fn unescape(fragment: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(fragment.len());
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }

        match chars.next() {
            Some(escaped) if escaped.is_ascii_alphanumeric() => return None,
            Some(escaped) => unescaped.push(escaped),
            None => unescaped.push(c),
        }
    }
    Some(unescaped)
}
