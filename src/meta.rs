//! Document metadata read from `swagger-meta.json`.
//!
//! Everything in a Swagger document that cannot be recovered from source annotations
//! (info block, host, base path, schemes, security definitions) lives in this file,
//! which sits at the root of the scanned source tree.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const META_FILE_NAME: &str = "swagger-meta.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default = "default_swagger_version")]
    pub swagger: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    #[serde(default)]
    pub tags: Vec<TagInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default = "default_api_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub terms_of_service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// A top-level tag declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub url: String,
}

fn default_swagger_version() -> String {
    "2.0".to_string()
}

fn default_api_version() -> String {
    "1.0.0".to_string()
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "Generated API".to_string(),
            description: String::new(),
            version: default_api_version(),
            terms_of_service: String::new(),
            contact: None,
            license: None,
        }
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            swagger: default_swagger_version(),
            info: Info::default(),
            host: String::new(),
            base_path: String::new(),
            tags: Vec::new(),
            schemes: Vec::new(),
            security_definitions: IndexMap::new(),
        }
    }
}

impl DocumentMeta {
    /// Placeholder metadata written by `--init`, meant to be edited by hand.
    pub fn scaffold() -> Self {
        Self {
            swagger: default_swagger_version(),
            info: Info {
                title: "My api title".to_string(),
                description: "My API Description".to_string(),
                version: "0.1.0".to_string(),
                terms_of_service: "TOS".to_string(),
                contact: Some(Contact {
                    email: "example@email.com".to_string(),
                }),
                license: Some(License {
                    name: "Apache 2.0".to_string(),
                    url: "http://www.apache.org/licenses/LICENSE-2.0.html".to_string(),
                }),
            },
            host: "myhost.com".to_string(),
            base_path: "/v1".to_string(),
            tags: Vec::new(),
            schemes: vec!["http".to_string()],
            security_definitions: IndexMap::new(),
        }
    }

    /// Loads `swagger-meta.json` from `source_dir`.
    ///
    /// A missing file falls back to defaults; an unreadable or invalid one is an error.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(META_FILE_NAME);
        if !path.exists() {
            warn!(
                "No {} found in {}, using default document metadata (run with --init to create one)",
                META_FILE_NAME,
                source_dir.display()
            );
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading document metadata from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid metadata file: {}", path.display()))
    }

    /// Writes [`DocumentMeta::scaffold`] to `source_dir/swagger-meta.json`, returning the path.
    pub fn write_scaffold(source_dir: &Path) -> Result<PathBuf> {
        let path = source_dir.join(META_FILE_NAME);
        let content = serde_json::to_string_pretty(&Self::scaffold())
            .context("Failed to serialize metadata scaffold")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write metadata file: {}", path.display()))?;
        Ok(path)
    }
}
