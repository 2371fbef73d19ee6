use crate::{
    error::{OpenApiError, OpenApiResult},
    naming::WordCasing,
    specification::{Contact, ExternalDocumentation, License, Tag},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// OpenAPI version written by default
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";

/// API version used until one is set
pub const DEFAULT_API_VERSION: &str = "0.0.0";

/// Configuration a document starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// OpenAPI specification version
    pub openapi_version: String,

    /// API information
    pub info: ApiInfo,

    /// Tags defined up front, in order
    pub tags: Vec<TagConfig>,

    /// Casing applied when deriving operation IDs from summaries
    pub operation_id_casing: WordCasing,

    /// Whether to generate nullable fields for Option<T>
    pub nullable_optional: bool,
}

/// API information section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    /// API title
    pub title: String,

    /// API description
    pub description: Option<String>,

    /// API version
    pub version: String,

    /// Terms of service URL
    pub terms_of_service: Option<String>,

    /// Contact information
    pub contact: Option<Contact>,

    /// License information
    pub license: Option<License>,
}

/// Tag configuration for grouping operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    pub name: String,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocumentation>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            info: ApiInfo::default(),
            tags: Vec::new(),
            operation_id_casing: WordCasing::default(),
            nullable_optional: true,
        }
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            version: DEFAULT_API_VERSION.to_string(),
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

impl DocumentConfig {
    /// Create a new configuration with the given API title
    pub fn new(title: &str) -> Self {
        let mut config = Self::default();
        config.info.title = title.to_string();
        config
    }

    /// Set the API version
    pub fn with_version(mut self, version: &str) -> Self {
        self.info.version = version.to_string();
        self
    }

    /// Add a tag
    pub fn add_tag(mut self, name: &str, description: Option<&str>) -> Self {
        self.tags.push(TagConfig {
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            external_docs: None,
        });
        self
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(input: &str) -> OpenApiResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a JSON configuration
    pub fn from_json_str(input: &str) -> OpenApiResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(input: &str) -> OpenApiResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a configuration file, picking the parser from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> OpenApiResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str) -> OpenApiResult<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(OpenApiError::config_error(format!(
                    "unsupported configuration file: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!("Loading document configuration from {}", path.display());
        parse(&fs::read_to_string(path)?)
    }
}

impl From<TagConfig> for Tag {
    fn from(tag: TagConfig) -> Self {
        Self {
            name: tag.name,
            description: tag.description,
            external_docs: tag.external_docs,
        }
    }
}
