//! Request handlers, as seen by the path helper.
//!
//! A handler exposes one [`Endpoint`](struct.Endpoint.html) per http method it
//! answers. Each endpoint carries its docstring and the names of its declared
//! parameters, the first one being the receiver.
//!
//! To describe a handler, implement the [Handler](trait.Handler.html) trait on
//! a struct:
//! ```rust
//! use apispec_urlspec::prelude::*;
//!
//! struct HelloHandler;
//!
//! impl Handler for HelloHandler {
//!     fn name(&self) -> &str {
//!         "HelloHandler"
//!     }
//!
//!     fn doc(&self) -> Option<&str> {
//!         Some("Greets the client.")
//!     }
//!
//!     fn endpoints(&self) -> Vec<Endpoint> {
//!         EndpointsBuilder::new()
//!             .add(Method::GET, &["self"], "Get a greeting endpoint.\n---\ndescription: Get a greeting\n")
//!             .build()
//!     }
//! }
//! ```

use http::Method;

/// Http methods a path item can describe, in the order operations are
/// extracted from a handler
pub static PATH_METHODS: [Method; 7] = [
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::PATCH,
];

/// Lowercase key of an http method inside a path item
pub fn operation_key(method: &Method) -> String {
    method.as_str().to_ascii_lowercase()
}

/// One http method implemented by a handler
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    method: Method,
    doc: Option<String>,
    params: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint from its method, declared parameter names and
    /// docstring
    pub fn new<P, S>(method: Method, params: P, doc: Option<&str>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Endpoint {
            method,
            doc: doc.map(str::to_string),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    ///
    pub fn method(&self) -> &Method {
        &self.method
    }

    ///
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Every declared parameter name, receiver included
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Declared parameter names without the leading receiver
    pub fn arguments(&self) -> &[String] {
        self.params.get(1..).unwrap_or(&[])
    }
}

/// Trait that defines how a handler advertises its endpoints
pub trait Handler: Send + Sync {
    /// Name of the handler, used in error messages
    fn name(&self) -> &str;

    /// Top level docstring of the handler
    fn doc(&self) -> Option<&str>;

    /// Returns a list of [`Endpoint`](struct.Endpoint.html), at most one per
    /// http method
    fn endpoints(&self) -> Vec<Endpoint>;

    /// Lookup the endpoint answering `method`
    fn endpoint(&self, method: &Method) -> Option<Endpoint> {
        self.endpoints().into_iter().find(|e| e.method() == method)
    }
}

/// Builder to simplify returning a list of endpoint in the `endpoints` method
/// of the handler trait
#[derive(Default)]
pub struct EndpointsBuilder {
    endpoints: Vec<Endpoint>,
}

impl EndpointsBuilder {
    /// Create a new endpoint builder
    #[inline]
    pub fn new() -> Self {
        Self { endpoints: Default::default() }
    }

    /// Add a documented endpoint to the builder. Adding a method twice
    /// replaces the previous endpoint.
    #[inline]
    pub fn add(self, method: Method, params: &[&str], doc: &str) -> Self {
        self.push(Endpoint::new(method, params.iter().copied(), Some(doc)))
    }

    /// Add an endpoint without any docstring
    #[inline]
    pub fn add_undocumented(self, method: Method, params: &[&str]) -> Self {
        self.push(Endpoint::new(method, params.iter().copied(), None))
    }

    fn push(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.retain(|e| e.method() != endpoint.method());
        self.endpoints.push(endpoint);
        self
    }

    /// Finish the builder into a list of endpoints
    #[inline]
    pub fn build(self) -> Vec<Endpoint> {
        self.endpoints
    }
}

/// A handler described by plain data rather than by a trait implementation
#[derive(Clone, Debug, Default)]
pub struct HandlerDescriptor {
    name: String,
    doc: Option<String>,
    endpoints: Vec<Endpoint>,
}

impl HandlerDescriptor {
    ///
    pub fn new<S: Into<String>>(name: S) -> Self {
        HandlerDescriptor {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the top level docstring
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    /// Set the endpoints, usually from an
    /// [`EndpointsBuilder`](struct.EndpointsBuilder.html)
    pub fn with_endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }
}

impl Handler for HandlerDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_skip_receiver() {
        let e = Endpoint::new(Method::GET, vec!["self", "user_id", "post_id"], None);
        assert_eq!(e.arguments(), &["user_id".to_string(), "post_id".to_string()]);
        assert_eq!(e.params().len(), 3);
    }

    #[test]
    fn arguments_of_empty_signature() {
        let e = Endpoint::new(Method::GET, Vec::<String>::new(), None);
        assert!(e.arguments().is_empty());
    }

    #[test]
    fn builder_replaces_duplicate_methods() {
        let endpoints = EndpointsBuilder::new()
            .add(Method::GET, &["self"], "first")
            .add_undocumented(Method::POST, &["self"])
            .add(Method::GET, &["self", "id"], "second")
            .build();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1].doc(), Some("second"));
        assert_eq!(endpoints[0].doc(), None);
    }

    #[test]
    fn descriptor_lookup_by_method() {
        let h = HandlerDescriptor::new("Items")
            .with_doc("Items handler")
            .with_endpoints(EndpointsBuilder::new().add(Method::PUT, &["self", "id"], "put it").build());
        assert_eq!(h.endpoint(&Method::PUT).map(|e| e.arguments().to_vec()), Some(vec!["id".to_string()]));
        assert!(h.endpoint(&Method::GET).is_none());
        assert_eq!(h.doc(), Some("Items handler"));
    }

    #[test]
    fn operation_keys_are_lowercase() {
        let keys: Vec<_> = PATH_METHODS.iter().map(operation_key).collect();
        assert_eq!(keys, vec!["get", "put", "post", "delete", "options", "head", "patch"]);
    }
}
