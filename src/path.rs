//! Conversion of a [`UrlSpec`](../urlspec/struct.UrlSpec.html) and its handler
//! into OpenAPI path items.

use crate::{
    docstring::load_yaml_from_docstring,
    error::{ApiSpecError, Result},
    handler::{operation_key, Endpoint, Handler, PATH_METHODS},
    template::substitute,
    urlspec::UrlSpec,
};
use http::Method;
use serde_yaml::Mapping;

const TRAILING_MARKERS: &[char] = &['/', '?', '*'];

/// Lazily yield the operation described by each documented endpoint of
/// `handler`, following the order of
/// [`PATH_METHODS`](../handler/static.PATH_METHODS.html).
///
/// Methods the handler does not implement and endpoints whose docstring holds
/// no yaml block are skipped.
pub fn operations_from_methods(handler: &dyn Handler) -> impl Iterator<Item = Result<(Method, Mapping)>> + '_ {
    PATH_METHODS.iter().filter_map(move |method| {
        let endpoint = handler.endpoint(method)?;
        match load_yaml_from_docstring(endpoint.doc()) {
            Ok(operation) if operation.is_empty() => {
                trace!("{} {} has no operation description", handler.name(), method);
                None
            }
            Ok(operation) => Some(Ok((method.clone(), operation))),
            Err(e) => Some(Err(e)),
        }
    })
}

/// Render the OpenAPI path of `urlspec`.
///
/// Named groups give the parameter names, ordered by group index. When the
/// groups are all positional, the arguments of `endpoint` are used instead.
/// Trailing `/`, `?` and `*` are dropped from paths with more than one
/// segment.
pub fn urlspec_to_openapi_path(urlspec: &UrlSpec, endpoint: Option<&Endpoint>) -> Result<String> {
    let path_tpl = urlspec
        .path_template()
        .ok_or_else(|| ApiSpecError::UnreversiblePattern(urlspec.regex().as_str().to_string()))?;

    let path = if urlspec.group_count() > 0 {
        let group_index = urlspec.group_index();
        let params: Vec<String> = if !group_index.is_empty() {
            group_index.into_iter().map(|(name, _)| format!("{{{}}}", name)).collect()
        } else {
            endpoint
                .map(Endpoint::arguments)
                .unwrap_or_default()
                .iter()
                .map(|arg| format!("{{{}}}", arg))
                .collect()
        };
        substitute(path_tpl, &params)?
    } else {
        path_tpl.to_string()
    };

    if path.matches('/').count() > 1 {
        Ok(path.trim_end_matches(TRAILING_MARKERS).to_string())
    } else {
        Ok(path)
    }
}

/// Load the handler level metadata from the handler's own docstring.
///
/// Every handler going through the path helper must be documented.
pub fn extensions_from_handler(handler: &dyn Handler) -> Result<Mapping> {
    let doc = handler
        .doc()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiSpecError::MissingHandlerDoc(handler.name().to_string()))?;
    load_yaml_from_docstring(Some(doc))
}

/// Key of `method` inside an operations mapping
pub(crate) fn method_key(method: &Method) -> serde_yaml::Value {
    serde_yaml::Value::String(operation_key(method))
}
