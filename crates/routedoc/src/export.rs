/*!
Writing finished documents to disk.
*/

use crate::{
    document::Document,
    error::{OpenApiError, OpenApiResult},
    specification::OpenApiSpec,
};
use std::fs;
use std::path::Path;

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON indented with four spaces
    Json,
    /// Single-line JSON
    CompactJson,
    Yaml,
}

impl ExportFormat {
    /// Pick the format from a file extension (`json`, `yaml`, `yml`)
    pub fn from_path<P: AsRef<Path>>(path: P) -> OpenApiResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            _ => Err(OpenApiError::config_error(format!(
                "cannot infer export format for {}",
                path.display()
            ))),
        }
    }
}

/// Render a document in the given format
pub fn render(doc: &Document, format: ExportFormat) -> OpenApiResult<String> {
    match format {
        ExportFormat::Json => doc.to_json_indent("", "    "),
        ExportFormat::CompactJson => doc.to_json(),
        ExportFormat::Yaml => doc.to_yaml(),
    }
}

/// Write a document to `path` in the given format
pub fn save_to_file<P: AsRef<Path>>(
    doc: &Document,
    path: P,
    format: ExportFormat,
) -> OpenApiResult<()> {
    let path = path.as_ref();
    let content = render(doc, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    tracing::info!("Wrote OpenAPI document to {}", path.display());
    Ok(())
}

/// Write a document to `path`, picking the format from its extension
pub fn write_to_file<P: AsRef<Path>>(doc: &Document, path: P) -> OpenApiResult<()> {
    let format = ExportFormat::from_path(path.as_ref())?;
    save_to_file(doc, path, format)
}

/// Load a previously exported specification
pub fn load_spec_from_file<P: AsRef<Path>>(path: P) -> OpenApiResult<OpenApiSpec> {
    let content = fs::read_to_string(path.as_ref())?;

    match ExportFormat::from_path(path.as_ref()) {
        Ok(ExportFormat::Yaml) => serde_yaml::from_str(&content).map_err(OpenApiError::from),
        Ok(_) => serde_json::from_str(&content).map_err(OpenApiError::from),
        Err(_) => {
            // Try to detect format from content
            if content.trim_start().starts_with('{') {
                serde_json::from_str(&content).map_err(OpenApiError::from)
            } else {
                serde_yaml::from_str(&content).map_err(OpenApiError::from)
            }
        }
    }
}
