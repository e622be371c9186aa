use regex::Error as RegexError;
use serde_yaml::Error as YamlError;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ApiSpecError>;

/// Failure of the positional `%s` substitution used to render path templates
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TemplateError {
    /// The template has more `%s` slots than there are parameter names
    #[error("not enough arguments for format string (expected at least {expected}, got {provided})")]
    NotEnoughArguments { expected: usize, provided: usize },
    /// Some parameter names were left over once every slot was filled
    #[error("not all arguments converted during string formatting ({used} used, {provided} provided)")]
    TooManyArguments { used: usize, provided: usize },
    /// A `%` followed by something other than `s` or `%`
    #[error("unsupported format character '{0}'")]
    UnsupportedFormat(char),
    /// A lone `%` at the very end of the template
    #[error("incomplete format")]
    IncompleteFormat,
}

/// Error type of the whole path helper stack
#[derive(Debug, Error)]
pub enum ApiSpecError {
    /// The handler of a route exposes no documented operation
    #[error("Could not find endpoint for urlspec {0}")]
    NoOperations(String),
    /// A handler was asked for its top level metadata but carries no doc
    #[error("expect that handler `{0}` has a docstring")]
    MissingHandlerDoc(String),
    /// The route pattern is too complex to be turned back into a template
    #[error("Cannot reverse route pattern `{0}` into a path template")]
    UnreversiblePattern(String),
    ///
    #[error(transparent)]
    Template(#[from] TemplateError),
    ///
    #[error("Invalid route pattern: {0}")]
    Regex(#[from] RegexError),
    /// Error from (de)serializing yaml data
    #[error(transparent)]
    Yaml(#[from] YamlError),
    /// The structured block of a docstring is not a mapping
    #[error("Docstring yaml block must be a mapping, found: {0}")]
    NotAMapping(String),
}
