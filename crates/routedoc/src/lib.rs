/*!
# routedoc

Fluent builder DSL for OpenAPI 3.0 documents.

Describe routes, operations, parameters and bodies in code, then render the
document as JSON or YAML. Request and response shapes come from Rust types
through the [`ShapeDescriptor`] trait, usually derived.

## Usage

```rust
use routedoc::{query_param, Document, ShapeDescriptor};

#[derive(ShapeDescriptor)]
struct User {
    name: String,
}

let mut api = Document::new("Users API");
api.version("1.0.0");

let mut users = api.route("/users");
users.summary("Registered users");
users
    .get()
    .summary("List users")
    .tags(["users"])
    .params([query_param::<u32>("page")])
    .response::<Vec<User>>(200);
users
    .post()
    .summary("Create user")
    .body::<User>()
    .response::<User>(201);

let json = api.to_json_indent("", "  ").unwrap();
assert!(json.contains("\"operationId\": \"listUsers\""));
assert_eq!(api.schemas().len(), 1);
```
*/

// Lets the derive macro's `::routedoc::` paths resolve inside this crate
extern crate self as routedoc;

// Re-export main types
pub use crate::{
    config::{DocumentConfig, TagConfig},
    content::{content_type, content_type_of_val},
    document::Document,
    error::{OpenApiError, OpenApiResult},
    export::ExportFormat,
    naming::WordCasing,
    operation::OperationBuilder,
    param::{cookie_param, header_param, path_param, query_param, Param},
    route::Route,
    schema::{SchemaConfig, SchemaGenerator},
    shape::{ShapeDescriptor, ShapeKind},
    specification::{Contact, ExternalDocumentation, License, Method, OpenApiSpec},
};

// Re-export the derive macro from the proc-macro crate
pub use routedoc_derive::ShapeDescriptor;

// Paths used by derive-generated code
#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

// Core modules
pub mod config;
pub mod error;
pub mod specification;

// Builders
pub mod document;
pub mod operation;
pub mod param;
pub mod route;

// Schema inference
pub mod content;
pub mod naming;
pub mod schema;
pub mod shape;

// Export functionality
pub mod export;
