//! Example: documenting a small users API
//!
//! Builds the document with the fluent DSL and writes it to the path given as
//! the first argument (default `openapi.json`). Set `RUST_LOG=routedoc=debug`
//! to watch routes and schemas being registered.

use routedoc::{
    export, header_param, path_param, query_param, Contact, Document, ShapeDescriptor, TagConfig,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// A registered user
#[derive(Debug, Serialize, Deserialize, ShapeDescriptor)]
struct User {
    /// Display name
    name: String,
}

/// Payload for creating a user
#[derive(Debug, Serialize, Deserialize, ShapeDescriptor)]
struct NewUser {
    name: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize, ShapeDescriptor)]
#[serde(rename_all = "camelCase")]
struct ApiError {
    error_code: u16,
    message: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let mut api = Document::new("Users API");
    api.version("1.0.0")
        .description("Sample API documented with routedoc")
        .contact(Contact {
            name: Some("API Team".to_string()),
            email: Some("api@example.com".to_string()),
            url: None,
        })
        .define_tag(TagConfig {
            name: "users".to_string(),
            description: Some("User management".to_string()),
            external_docs: None,
        });

    let mut users = api.route("/users");
    users.summary("Registered users");
    users
        .get()
        .summary("List users")
        .tags(["users"])
        .params([
            query_param::<u32>("page").description("Page number"),
            header_param::<String>("X-Request-Id"),
        ])
        .response::<Vec<User>>(200);
    users
        .post()
        .summary("Create user")
        .tags(["users"])
        .body::<NewUser>()
        .response::<User>(201)
        .response::<ApiError>(422);

    let mut user = api.route("/users/{id}");
    user.get()
        .summary("Get user")
        .tags(["users"])
        .params([path_param::<u64>("id").required()])
        .response::<User>(200)
        .response::<ApiError>(404);
    user.delete()
        .summary("Remove user")
        .tags(["users"])
        .params([path_param::<u64>("id").required()])
        .response::<()>(204)
        .deprecated();

    export::write_to_file(&api, &output)?;

    println!("📄 Wrote {} ({} paths, {} schemas)", output, api.build().paths.len(), api.schemas().len());
    Ok(())
}
