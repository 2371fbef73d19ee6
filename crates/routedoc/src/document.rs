use crate::{
    config::{DocumentConfig, TagConfig},
    error::OpenApiResult,
    naming::WordCasing,
    route::Route,
    schema::{SchemaConfig, SchemaGenerator},
    specification::{Components, Contact, License, OpenApiSpec, PathItem, Schema},
};
use std::collections::BTreeMap;

/// An OpenAPI document under construction
///
/// Every setter mutates the document in place and returns it for chaining.
/// Routes are reached through [`Document::route`].
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) spec: OpenApiSpec,
    pub(crate) schemas: SchemaGenerator,
    pub(crate) casing: WordCasing,
}

impl Document {
    /// Create an empty document with the given title
    pub fn new(title: &str) -> Self {
        Self::from_config(DocumentConfig::new(title))
    }

    /// Create an empty document from configuration
    pub fn from_config(config: DocumentConfig) -> Self {
        let mut spec = OpenApiSpec::new(
            &config.openapi_version,
            &config.info.title,
            &config.info.version,
        );
        spec.info.description = config.info.description;
        spec.info.terms_of_service = config.info.terms_of_service;
        spec.info.contact = config.info.contact;
        spec.info.license = config.info.license;
        spec.tags = config.tags.into_iter().map(Into::into).collect();

        let schema_config = SchemaConfig::new().with_nullable_optional(config.nullable_optional);

        Self {
            spec,
            schemas: SchemaGenerator::new(schema_config),
            casing: config.operation_id_casing,
        }
    }

    /// Document a route, creating its path item on first use
    pub fn route(&mut self, path: &str) -> Route<'_> {
        if !self.spec.paths.contains_key(path) {
            tracing::debug!("Documenting new route {}", path);
            self.spec.paths.insert(path.to_string(), PathItem::default());
        }

        Route::new(self, path.to_string())
    }

    /// Set the title of the API
    pub fn title(&mut self, text: &str) -> &mut Self {
        self.spec.info.title = text.to_string();
        self
    }

    /// Set the description of the API
    pub fn description(&mut self, text: &str) -> &mut Self {
        self.spec.info.description = Some(text.to_string());
        self
    }

    /// Set the terms of service URL. Not validated.
    pub fn terms_of_service(&mut self, url: &str) -> &mut Self {
        self.spec.info.terms_of_service = Some(url.to_string());
        self
    }

    /// Set the contact details of the API
    pub fn contact(&mut self, contact: Contact) -> &mut Self {
        self.spec.info.contact = Some(contact);
        self
    }

    /// Set the license details of the API
    pub fn license(&mut self, license: License) -> &mut Self {
        self.spec.info.license = Some(license);
        self
    }

    /// Set the version of the API
    pub fn version(&mut self, version: &str) -> &mut Self {
        self.spec.info.version = version.to_string();
        self
    }

    /// Define a tag for use in operations
    ///
    /// The metadata is shown by documentation tools wherever the tag is used.
    pub fn define_tag(&mut self, tag: TagConfig) -> &mut Self {
        self.spec.tags.push(tag.into());
        self
    }

    /// Set the casing used when deriving operation IDs
    pub fn operation_id_casing(&mut self, casing: WordCasing) -> &mut Self {
        self.casing = casing;
        self
    }

    /// Pre-declare a component schema by name
    ///
    /// Use this for types whose shape cannot be described automatically,
    /// such as recursive types.
    pub fn declare_schema(&mut self, name: &str, schema: Schema) -> &mut Self {
        self.schemas.declare(name, schema);
        self
    }

    /// Path item documented for `path`
    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.spec.paths.get(path)
    }

    /// Component schemas registered so far
    pub fn schemas(&self) -> &BTreeMap<String, Schema> {
        self.schemas.get_schemas()
    }

    /// Assemble the finished specification
    pub fn build(&self) -> OpenApiSpec {
        let mut spec = self.spec.clone();
        if !self.schemas.is_empty() {
            spec.components = Some(Components {
                schemas: self.schemas.get_schemas().clone(),
            });
        }
        spec
    }

    /// Render the document as compact JSON
    pub fn to_json(&self) -> OpenApiResult<String> {
        Ok(serde_json::to_string(&self.build())?)
    }

    /// Render the document as indented JSON
    ///
    /// Each nested level is indented by `indent`, and every line after the
    /// first starts with `prefix`.
    pub fn to_json_indent(&self, prefix: &str, indent: &str) -> OpenApiResult<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        serde::Serialize::serialize(&self.build(), &mut serializer)?;

        // serde_json escapes newlines inside strings, so every raw newline is a line break
        let rendered = String::from_utf8_lossy(&buffer);
        if prefix.is_empty() {
            Ok(rendered.into_owned())
        } else {
            Ok(rendered.replace('\n', &format!("\n{prefix}")))
        }
    }

    /// Render the document as YAML
    pub fn to_yaml(&self) -> OpenApiResult<String> {
        Ok(serde_yaml::to_string(&self.build())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::ExternalDocumentation;
    use serde_json::{json, Value};

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new("Test API");
        let spec = doc.build();

        assert_eq!(spec.openapi, "3.0.0");
        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.info.version, "0.0.0");
        assert!(spec.paths.is_empty());
        assert!(spec.components.is_none());
        assert!(spec.tags.is_empty());
    }

    #[test]
    fn test_info_setters() {
        let mut doc = Document::new("placeholder");
        doc.title("Users API")
            .version("1.0.0")
            .description("Manage users")
            .terms_of_service("not a url")
            .contact(Contact {
                name: Some("API Team".to_string()),
                url: None,
                email: Some("api@example.com".to_string()),
            })
            .license(License {
                name: "MIT".to_string(),
                url: Some("https://opensource.org/licenses/MIT".to_string()),
            });

        let info = doc.build().info;
        assert_eq!(info.title, "Users API");
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.description.as_deref(), Some("Manage users"));
        assert_eq!(info.terms_of_service.as_deref(), Some("not a url"));
        assert_eq!(info.contact.unwrap().name.as_deref(), Some("API Team"));
        assert_eq!(info.license.unwrap().name, "MIT");
    }

    #[test]
    fn test_define_tag_appends_in_order() {
        let mut doc = Document::new("Test API");
        doc.define_tag(TagConfig {
            name: "users".to_string(),
            description: Some("User operations".to_string()),
            external_docs: Some(ExternalDocumentation {
                url: "https://example.com/users".to_string(),
                description: None,
            }),
        })
        .define_tag(TagConfig {
            name: "admin".to_string(),
            ..Default::default()
        });

        let tags = doc.build().tags;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "users");
        assert_eq!(tags[1].name, "admin");
        assert!(tags[1].external_docs.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = DocumentConfig::new("Configured")
            .with_version("3.1.4")
            .add_tag("users", None);
        let doc = Document::from_config(config);

        let spec = doc.build();
        assert_eq!(spec.info.title, "Configured");
        assert_eq!(spec.info.version, "3.1.4");
        assert_eq!(spec.tags[0].name, "users");
    }

    #[test]
    fn test_config_info_is_carried_unchanged() {
        let contact = Contact {
            name: Some("API Team".to_string()),
            url: Some("https://example.com".to_string()),
            email: None,
        };
        let license = License {
            name: "Apache-2.0".to_string(),
            url: None,
        };
        let mut config = DocumentConfig::new("Configured");
        config.info.contact = Some(contact.clone());
        config.info.license = Some(license.clone());

        let info = Document::from_config(config).build().info;
        assert_eq!(info.contact, Some(contact));
        assert_eq!(info.license, Some(license));
    }

    #[test]
    fn test_compact_json_layout() {
        let mut doc = Document::new("Test API");
        doc.version("1.0.0");
        doc.route("/health");

        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "openapi": "3.0.0",
                "info": {"title": "Test API", "version": "1.0.0"},
                "paths": {"/health": {}}
            })
        );
    }

    #[test]
    fn test_indent_prefix_and_round_trip() {
        let mut doc = Document::new("Test API");
        doc.description("line one\nline two");
        doc.route("/users").summary("Users");

        let compact = doc.to_json().unwrap();
        let indented = doc.to_json_indent("", "    ").unwrap();
        let prefixed = doc.to_json_indent("// ", "\t").unwrap();

        assert!(!compact.contains('\n'));
        assert!(indented.contains("\n    \"info\""));
        assert!(prefixed.starts_with('{'));
        for line in prefixed.lines().skip(1) {
            assert!(line.starts_with("// "), "{line:?}");
        }

        let compact: Value = serde_json::from_str(&compact).unwrap();
        let indented: Value = serde_json::from_str(&indented).unwrap();
        assert_eq!(compact, indented);
    }

    #[test]
    fn test_yaml_output() {
        let mut doc = Document::new("Test API");
        doc.version("1.0.0");

        let yaml = doc.to_yaml().unwrap();
        let reparsed: OpenApiSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reparsed, doc.build());
    }
}
