//! Minimal OpenAPI document assembly on top of the path helper.
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
//! let mut spec = ApiSpec::builder().title("Greetings").version("1.0.0").build();
//! spec.path(("/hello", handler), Mapping::new(), PathArgs::default()).unwrap();
//! assert!(spec.to_yaml().unwrap().contains("/hello"));
//! ```

use crate::{
    error::Result,
    plugin::{PathArgs, UrlSpecPlugin},
    urlspec::UrlSpecArg,
};
use serde_derive::Serialize;
use serde_yaml::{Mapping, Value};

/// Default OpenAPI version of the generated document
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.2";

/// General information about the documented api
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
pub struct Info {
    ///
    pub title: String,
    ///
    pub version: String,
}

#[derive(Serialize)]
struct Document<'a> {
    openapi: &'a str,
    info: &'a Info,
    paths: &'a Mapping,
}

/// An OpenAPI document being assembled path by path
#[derive(Clone, Debug)]
pub struct ApiSpec {
    openapi_version: String,
    info: Info,
    paths: Mapping,
    plugin: UrlSpecPlugin,
}

impl ApiSpec {
    /// Produce a document builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Add the route `urlspec` to the document.
    ///
    /// `operations` is completed by the path helper then merged into the path
    /// item, overwriting operations already documented for that path. Returns
    /// the path the operations were added under.
    pub fn path<U: Into<UrlSpecArg>>(&mut self, urlspec: U, mut operations: Mapping, args: PathArgs) -> Result<String> {
        let path = self.plugin.path_helper(urlspec, &mut operations, &args)?;

        let item = self
            .paths
            .entry(Value::String(path.clone()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !item.is_mapping() {
            *item = Value::Mapping(Mapping::new());
        }
        if let Value::Mapping(item) = item {
            for (key, value) in operations {
                item.insert(key, value);
            }
            if let Some(summary) = args.summary {
                item.insert("summary".into(), summary.into());
            }
            if let Some(description) = args.description {
                item.insert("description".into(), description.into());
            }
            if !args.parameters.is_empty() {
                item.insert("parameters".into(), Value::Sequence(args.parameters));
            }
        }

        trace!("{} path(s) documented", self.paths.len());
        Ok(path)
    }

    ///
    pub fn openapi_version(&self) -> &str {
        &self.openapi_version
    }

    ///
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Path items, in the order their paths were first added
    pub fn paths(&self) -> &Mapping {
        &self.paths
    }

    /// The whole document as a yaml value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_yaml::to_value(self.document())?)
    }

    /// The whole document serialized as yaml
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.document())?)
    }

    fn document(&self) -> Document<'_> {
        Document {
            openapi: &self.openapi_version,
            info: &self.info,
            paths: &self.paths,
        }
    }
}

/// Builder of an [`ApiSpec`](struct.ApiSpec.html)
pub struct Builder {
    openapi_version: String,
    info: Info,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::default(),
        }
    }
}

impl Builder {
    /// Title of the documented api
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.info.title = title.into();
        self
    }

    /// Version of the documented api
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.info.version = version.into();
        self
    }

    /// Version of the OpenAPI specification the document follows
    pub fn openapi_version<S: Into<String>>(mut self, version: S) -> Self {
        self.openapi_version = version.into();
        self
    }

    ///
    pub fn build(self) -> ApiSpec {
        ApiSpec {
            openapi_version: self.openapi_version,
            info: self.info,
            paths: Mapping::new(),
            plugin: UrlSpecPlugin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{EndpointsBuilder, Handler, HandlerDescriptor};
    use http::Method;
    use std::sync::Arc;

    fn item_handler() -> Arc<dyn Handler> {
        Arc::new(
            HandlerDescriptor::new("ItemHandler")
                .with_doc("Items.")
                .with_endpoints(
                    EndpointsBuilder::new()
                        .add(Method::GET, &["self", "item_id"], "Read.\n    ---\n    description: read an item\n")
                        .add(Method::PUT, &["self", "item_id"], "Write.\n    ---\n    description: write an item\n")
                        .build(),
                ),
        )
    }

    #[test]
    fn builder_defaults() {
        let spec = ApiSpec::builder().build();
        assert_eq!(spec.openapi_version(), DEFAULT_OPENAPI_VERSION);
        assert_eq!(spec.info(), &Info::default());
        assert!(spec.paths().is_empty());
    }

    #[test]
    fn paths_are_merged() {
        let mut spec = ApiSpec::builder().title("Items").version("2.1.0").openapi_version("3.1.0").build();
        let path = spec.path((r"/items/(\d+)", item_handler()), Mapping::new(), PathArgs::default()).unwrap();
        assert_eq!(path, "/items/{item_id}");

        let parameters = vec![serde_yaml::from_str("{name: item_id, in: path, required: true}").unwrap()];
        let args = PathArgs {
            summary: Some("One item".to_string()),
            parameters,
            ..Default::default()
        };
        spec.path((r"/items/(\d+)/", item_handler()), Mapping::new(), args).unwrap();

        assert_eq!(spec.paths().len(), 1);
        let item = &spec.paths()["/items/{item_id}"];
        assert_eq!(item["get"]["description"].as_str(), Some("read an item"));
        assert_eq!(item["summary"].as_str(), Some("One item"));
        assert_eq!(item["parameters"][0]["name"].as_str(), Some("item_id"));
    }

    #[test]
    fn document_serialization() {
        let mut spec = ApiSpec::builder().title("Items").version("1.0.0").build();
        spec.path((r"/items/(\d+)", item_handler()), Mapping::new(), PathArgs::default()).unwrap();

        let doc = spec.to_value().unwrap();
        assert_eq!(doc["openapi"].as_str(), Some("3.0.2"));
        assert_eq!(doc["info"]["title"].as_str(), Some("Items"));
        assert_eq!(doc["paths"]["/items/{item_id}"]["put"]["description"].as_str(), Some("write an item"));

        let yaml = spec.to_yaml().unwrap();
        assert!(yaml.starts_with("openapi:"));
        assert!(yaml.contains("/items/{item_id}"));
    }
}
