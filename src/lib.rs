//! ### An OpenAPI path helper for regex routed request handlers
//! Routes are described by a regex pattern bound to a handler. Each endpoint of
//! the handler documents its operation in a yaml block at the end of its
//! docstring; this crate turns the route into an OpenAPI path template and
//! collects those operations.
//!
//! Just `use` the prelude module, and you're ready to go!
//!
//! ## Quick path setup
//! ```rust
//! use apispec_urlspec::prelude::*;
//! use serde_yaml::Mapping;
//! use std::sync::Arc;
//!
//! let handler: Arc<dyn Handler> = Arc::new(
//!     HandlerDescriptor::new("UserHandler")
//!         .with_doc("Users of the blog.")
//!         .with_endpoints(
//!             EndpointsBuilder::new()
//!                 .add(Method::GET, &["self", "user_id"], "Fetch a user.\n---\ndescription: Get a user\n")
//!                 .build(),
//!         ),
//! );
//!
//! let mut spec = ApiSpec::builder().title("Blog").version("1.0.0").build();
//! let path = spec.path((r"/users/(\d+)/?", handler), Mapping::new(), PathArgs::default()).unwrap();
//! assert_eq!(path, "/users/{user_id}");
//! ```

#[macro_use]
extern crate log;

/// Yaml blocks embedded in docstrings
pub mod docstring;
/// Error definitions
pub mod error;
/// Definition of the handlers a route dispatches to
pub mod handler;
///
pub mod path;
/// The path helper entry point
pub mod plugin;
/// OpenAPI document assembly
pub mod spec;
///
pub mod template;
/// Route patterns
pub mod urlspec;
///
pub use http;

/// Contains everything you need to document your routes
pub mod prelude {
    ///
    pub use crate::error::ApiSpecError;
    ///
    pub use crate::handler::Endpoint;
    ///
    pub use crate::handler::EndpointsBuilder;
    ///
    pub use crate::handler::Handler;
    ///
    pub use crate::handler::HandlerDescriptor;
    ///
    pub use crate::plugin::PathArgs;
    ///
    pub use crate::plugin::UrlSpecPlugin;
    ///
    pub use crate::spec::ApiSpec;
    ///
    pub use crate::urlspec::RawUrlSpec;
    ///
    pub use crate::urlspec::UrlSpec;
    ///
    pub use crate::urlspec::UrlSpecArg;
    ///
    pub use http::Method;
}
