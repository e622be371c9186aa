//! Extraction of the yaml block embedded in a handler docstring.
//!
//! A docstring is free text. Everything after the first line starting with
//! `---` is read as a yaml document describing the operation:
//!
//! ```text
//! Get a greeting endpoint.
//! ---
//! description: Get a greeting
//! responses:
//!     200:
//!         description: A greeting to the client
//! ```

use crate::{
    error::{ApiSpecError, Result},
    handler::PATH_METHODS,
};
use serde_yaml::{Mapping, Value};

const TAB_SIZE: usize = 8;
const YAML_BLOCK_MARKER: &str = "---";

/// Uniformly remove the indentation of a docstring.
///
/// The first line is stripped on its own, the common indentation of the
/// remaining lines is removed, and blank lines are dropped from both ends.
pub fn trim_docstring(docstring: &str) -> String {
    if docstring.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = docstring.lines().map(expand_tabs).collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim_start().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    let mut trimmed = Vec::with_capacity(lines.len());
    trimmed.push(lines[0].trim().to_string());
    if let Some(indent) = indent {
        trimmed.extend(lines.iter().skip(1).map(|l| skip_chars(l, indent).trim_end().to_string()));
    }

    while trimmed.last().filter(|l| l.is_empty()).is_some() {
        trimmed.pop();
    }
    let leading_blanks = trimmed.iter().take_while(|l| l.is_empty()).count();

    trimmed[leading_blanks..].join("\n")
}

/// Remove any whitespace prefix shared by every non blank line.
/// Lines made only of whitespace are normalized to empty lines.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let indent = &line[..line.len() - line.trim_start().len()];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    let margin = margin.unwrap_or("");

    text.lines()
        .map(|l| if l.trim().is_empty() { "" } else { &l[margin.len()..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load the yaml block of a docstring.
///
/// Absent docstrings, docstrings without a `---` line, and empty yaml blocks
/// all produce an empty mapping.
pub fn load_yaml_from_docstring(docstring: Option<&str>) -> Result<Mapping> {
    let docstring = match docstring.filter(|d| !d.trim().is_empty()) {
        Some(d) => d,
        None => return Ok(Mapping::new()),
    };

    let trimmed = trim_docstring(docstring);
    let split_lines: Vec<&str> = trimmed.split('\n').collect();
    let cut_from = match split_lines.iter().position(|l| l.trim().starts_with(YAML_BLOCK_MARKER)) {
        Some(index) => index,
        None => {
            trace!("docstring has no yaml block");
            return Ok(Mapping::new());
        }
    };

    let yaml_string = dedent(&split_lines[cut_from..].join("\n"));
    match serde_yaml::from_str::<Value>(&yaml_string)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(m) => Ok(m),
        other => Err(ApiSpecError::NotAMapping(format!("{:?}", other))),
    }
}

/// Load the yaml block of a docstring, keeping only operation keys: the http
/// methods of a path item and `x-` vendor extensions.
pub fn load_operations_from_docstring(docstring: Option<&str>) -> Result<Mapping> {
    let doc_data = load_yaml_from_docstring(docstring)?;
    Ok(doc_data
        .into_iter()
        .filter(|(key, _)| key.as_str().filter(|k| is_operation_key(k)).is_some())
        .collect())
}

fn is_operation_key(key: &str) -> bool {
    key.starts_with("x-") || PATH_METHODS.iter().any(|m| m.as_str().eq_ignore_ascii_case(key))
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut expanded = String::with_capacity(line.len() + TAB_SIZE);
    let mut column = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                expanded.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            c => {
                expanded.push(c);
                column += 1;
            }
        }
    }
    expanded
}

fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING_DOC: &str = "Get a greeting endpoint.
        ---
        description: Get a greeting
        responses:
            200:
                description: A greeting to the client
        ";

    fn key(k: &str) -> Value {
        Value::String(k.to_string())
    }

    #[test]
    fn trim_removes_common_indentation() {
        let trimmed = trim_docstring("  First line.\n\n      Indented body\n    body\n\n");
        assert_eq!(trimmed, "First line.\n\n  Indented body\nbody");
    }

    #[test]
    fn trim_drops_leading_blank_lines() {
        assert_eq!(trim_docstring("\n    Only body\n"), "Only body");
    }

    #[test]
    fn dedent_keeps_relative_indentation() {
        assert_eq!(dedent("    a:\n      b: 1\n   \n    c: 2"), "a:\n  b: 1\n\nc: 2");
    }

    #[test]
    fn load_greeting_docstring() {
        let data = load_yaml_from_docstring(Some(GREETING_DOC)).unwrap();
        assert_eq!(data.get(&key("description")), Some(&key("Get a greeting")));
        let responses = data.get(&key("responses")).and_then(Value::as_mapping).unwrap();
        assert!(responses.get(&Value::Number(200.into())).is_some());
    }

    #[test]
    fn absent_or_blank_docstring_is_empty() {
        assert!(load_yaml_from_docstring(None).unwrap().is_empty());
        assert!(load_yaml_from_docstring(Some("")).unwrap().is_empty());
        assert!(load_yaml_from_docstring(Some("   \n  ")).unwrap().is_empty());
    }

    #[test]
    fn docstring_without_marker_is_empty() {
        assert!(load_yaml_from_docstring(Some("Just some prose.\n    No metadata here.")).unwrap().is_empty());
    }

    #[test]
    fn empty_yaml_block_is_empty() {
        assert!(load_yaml_from_docstring(Some("Summary\n    ---\n")).unwrap().is_empty());
    }

    #[test]
    fn scalar_yaml_block_is_rejected() {
        let res = load_yaml_from_docstring(Some("Summary\n    ---\n    just a string\n"));
        assert!(matches!(res, Err(ApiSpecError::NotAMapping(_))));
    }

    #[test]
    fn operations_keep_methods_and_extensions() {
        let doc = "Handler doc.
            ---
            x-extension: value
            get:
                description: fetch
            tags: [a]
            ";
        let ops = load_operations_from_docstring(Some(doc)).unwrap();
        assert_eq!(ops.len(), 2);
        assert!(ops.contains_key(&key("get")));
        assert!(ops.contains_key(&key("x-extension")));
        assert!(!ops.contains_key(&key("tags")));
    }

    #[test]
    fn tabs_are_expanded() {
        assert_eq!(expand_tabs("a\tb"), "a       b");
        assert_eq!(expand_tabs("\tb"), "        b");
    }
}
