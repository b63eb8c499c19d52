//! Serialization of Swagger documents to YAML or JSON.

use crate::assembler::SwaggerDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a document to YAML.
pub fn serialize_yaml(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing swagger document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize swagger document to YAML")
}

/// Serializes a document to pretty-printed JSON.
pub fn serialize_json(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing swagger document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize swagger document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// Overwrites the file if it exists.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{DocumentAssembler, FileRecords};
    use crate::meta::DocumentMeta;
    use crate::routes::Route;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_document() -> SwaggerDocument {
        let route = Route {
            operation_id: "GetUsers".to_string(),
            verb: "GET".to_string(),
            path: "/users".to_string(),
            description: Some("Lists users".to_string()),
            params: Vec::new(),
            responses: Vec::new(),
            tags: Vec::new(),
            source_file: PathBuf::from("users.go"),
            line_number: 3,
        };
        let mut meta = DocumentMeta::default();
        meta.info.title = "Test API".to_string();

        DocumentAssembler::new(meta).assemble(&[FileRecords {
            source_file: PathBuf::from("users.go"),
            routes: vec![route],
            models: Vec::new(),
        }])
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_document()).unwrap();

        assert!(yaml.contains("swagger:"));
        assert!(yaml.contains("'2.0'") || yaml.contains("\"2.0\""));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("/users:"));
        assert!(yaml.contains("get:"));
        assert!(yaml.contains("operationId: GetUsers"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&create_test_document()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["swagger"], "2.0");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert_eq!(parsed["paths"]["/users"]["get"]["operationId"], "GetUsers");
        assert!(parsed["definitions"].is_object());
    }

    #[test]
    fn test_serialize_json_pretty_format() {
        let json = serialize_json(&create_test_document()).unwrap();

        assert!(json.contains('\n'));
        assert!(json.contains("  "));
        assert!(json.lines().count() > 5, "Pretty printed JSON should have multiple lines");
    }

    #[test]
    fn test_json_document_reads_back() {
        let doc = create_test_document();
        let json = serialize_json(&doc).unwrap();

        let deserialized: SwaggerDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, doc);
    }

    #[test]
    fn test_yaml_document_reads_back() {
        let doc = create_test_document();
        let yaml = serialize_yaml(&doc).unwrap();

        let deserialized: SwaggerDocument = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(deserialized.paths, doc.paths);
        assert_eq!(deserialized.info.title, "Test API");
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("swagger.yaml");

        write_to_file("test content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "test content");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("swagger.json");

        write_to_file("initial content", &file_path).unwrap();
        write_to_file("new content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }
}
