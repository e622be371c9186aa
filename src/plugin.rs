//! The path helper: the entry point turning a route into an OpenAPI path and
//! its operations.
//!
//! ```rust
//! use apispec_urlspec::prelude::*;
//! use serde_yaml::Mapping;
//! use std::sync::Arc;
//!
//! let handler: Arc<dyn Handler> = Arc::new(
//!     HandlerDescriptor::new("HelloHandler")
//!         .with_doc("Greets the client.")
//!         .with_endpoints(
//!             EndpointsBuilder::new()
//!                 .add(Method::GET, &["self"], "Get a greeting endpoint.\n---\ndescription: Get a greeting\n")
//!                 .build(),
//!         ),
//! );
//!
//! let mut operations = Mapping::new();
//! let path = UrlSpecPlugin.path_helper(("/hello", handler), &mut operations, &PathArgs::default()).unwrap();
//! assert_eq!(path, "/hello");
//! assert!(operations.contains_key("get"));
//! ```

use crate::{
    error::{ApiSpecError, Result},
    path::{extensions_from_handler, method_key, operations_from_methods, urlspec_to_openapi_path},
    urlspec::UrlSpecArg,
};
use http::Method;
use serde_yaml::{Mapping, Value};

/// Path level arguments of the document assembly.
///
/// The path helper receives them along with the route but does not use them.
#[derive(Clone, Debug, Default)]
pub struct PathArgs {
    /// Summary of the whole path item
    pub summary: Option<String>,
    /// Description of the whole path item
    pub description: Option<String>,
    /// Parameters shared by every operation of the path item
    pub parameters: Vec<Value>,
}

/// Path helper accepting a [`UrlSpec`](../urlspec/struct.UrlSpec.html) or the
/// raw arguments of one
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlSpecPlugin;

impl UrlSpecPlugin {
    /// Fill `operations` from the handler of `urlspec` and return the OpenAPI
    /// path of the route.
    ///
    /// Operations described by the handler endpoints are merged first, then
    /// the metadata of the handler's own docstring; both overwrite existing
    /// keys. The parameter names of positional groups come from the endpoint
    /// of the first key of `operations`.
    pub fn path_helper<U: Into<UrlSpecArg>>(&self, urlspec: U, operations: &mut Mapping, _args: &PathArgs) -> Result<String> {
        let urlspec = urlspec.into().into_url_spec()?;
        let handler = urlspec.handler().as_ref();

        for operation in operations_from_methods(handler) {
            let (method, description) = operation?;
            operations.insert(method_key(&method), Value::Mapping(description));
        }

        if operations.is_empty() {
            return Err(ApiSpecError::NoOperations(urlspec.to_string()));
        }

        let params_endpoint = operations
            .keys()
            .next()
            .and_then(Value::as_str)
            .and_then(|key| Method::from_bytes(key.to_ascii_uppercase().as_bytes()).ok())
            .and_then(|method| handler.endpoint(&method));

        for (key, value) in extensions_from_handler(handler)? {
            operations.insert(key, value);
        }

        let path = urlspec_to_openapi_path(&urlspec, params_endpoint.as_ref())?;
        debug!("{} resolved to path `{}` with {} operation key(s)", handler.name(), path, operations.len());
        Ok(path)
    }
}
