use crate::{
    error::{OpenApiError, OpenApiResult},
    shape::ShapeDescriptor,
    specification::Schema,
};
use std::collections::BTreeMap;

/// Schema generator for converting Rust types to OpenAPI schemas
///
/// Owns the component schema table. Named shapes are described once, stored
/// under their name and handed out as `$ref` schemas afterwards.
#[derive(Debug, Clone, Default)]
pub struct SchemaGenerator {
    /// Component schema table
    schemas: BTreeMap<String, Schema>,
    /// Names currently being described, innermost last
    in_progress: Vec<String>,
    /// Rust type that claimed each component name
    owners: BTreeMap<String, &'static str>,
    /// Configuration options
    config: SchemaConfig,
}

/// Configuration for schema generation
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    /// Generate nullable schemas for Option<T>
    pub nullable_optional: bool,
    /// Pre-declared schemas, used instead of describing the named type
    pub custom_mappings: BTreeMap<String, Schema>,
}

impl SchemaGenerator {
    /// Create a new schema generator
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            schemas: BTreeMap::new(),
            in_progress: Vec::new(),
            owners: BTreeMap::new(),
            config,
        }
    }

    /// Generation settings
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Pre-declare the schema for a component name
    ///
    /// Types reporting this name are no longer described; references to them
    /// resolve to this schema. This is how recursive types are documented.
    pub fn declare(&mut self, name: &str, schema: Schema) {
        self.config.custom_mappings.insert(name.to_string(), schema);
    }

    /// Generate the schema for `T`, registering named shapes as components
    ///
    /// A component name belongs to the first type that used it. Another type
    /// reporting the same name is a collision and fails with a schema error.
    pub fn generate<T: ShapeDescriptor + ?Sized>(&mut self) -> OpenApiResult<Schema> {
        let Some(name) = T::schema_name() else {
            return T::describe(self);
        };
        let type_name = std::any::type_name::<T>();

        if let Some(owner) = self.owners.get(&name) {
            if *owner != type_name {
                return Err(OpenApiError::schema_error(format!(
                    "component name collision: {} is used by both {} and {}",
                    name, owner, type_name
                )));
            }
        }

        // Check cache first
        if self.schemas.contains_key(&name) {
            return Ok(Schema::reference(&name));
        }

        // Check custom mappings
        if let Some(schema) = self.config.custom_mappings.get(&name) {
            self.schemas.insert(name.clone(), schema.clone());
            self.owners.insert(name.clone(), type_name);
            return Ok(Schema::reference(&name));
        }

        if self.in_progress.contains(&name) {
            return Err(OpenApiError::schema_error(format!(
                "cyclic type reference: {} -> {}",
                self.in_progress.join(" -> "),
                name
            )));
        }

        self.in_progress.push(name.clone());
        self.owners.insert(name.clone(), type_name);
        let described = T::describe(self);
        self.in_progress.pop();

        let schema = match described {
            Ok(schema) => schema,
            Err(err) => {
                self.owners.remove(&name);
                return Err(err);
            }
        };
        tracing::debug!("Registered component schema {}", name);
        self.schemas.insert(name.clone(), schema);
        Ok(Schema::reference(&name))
    }

    /// Generate the schema for `T` with a top-level `$ref` replaced by the
    /// component body
    ///
    /// Flattened fields use this to merge the inner properties into their
    /// parent.
    pub fn generate_inline<T: ShapeDescriptor + ?Sized>(&mut self) -> OpenApiResult<Schema> {
        let schema = self.generate::<T>()?;
        let body = schema
            .referenced_name()
            .and_then(|name| self.schemas.get(name))
            .cloned();
        Ok(body.unwrap_or(schema))
    }

    /// Look up a registered component schema
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Get all generated schemas
    pub fn get_schemas(&self) -> &BTreeMap<String, Schema> {
        &self.schemas
    }

    /// Number of registered component schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            nullable_optional: true,
            custom_mappings: BTreeMap::new(),
        }
    }
}

impl SchemaConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set nullable option handling
    pub fn with_nullable_optional(mut self, nullable: bool) -> Self {
        self.nullable_optional = nullable;
        self
    }

    /// Add custom type mapping
    pub fn with_custom_mapping(mut self, type_name: &str, schema: Schema) -> Self {
        self.custom_mappings.insert(type_name.to_string(), schema);
        self
    }
}
