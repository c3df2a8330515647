use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::media_type;

/// OCI Image Index (manifest list) for multi-arch support.
///
/// Entries are kept as raw JSON values: descriptors copied out of a nested
/// index must survive verbatim, including fields this crate does not model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageIndex {
    #[serde(rename = "schemaVersion")]
    pub schema_version: i32,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub manifests: Vec<Value>,
}

impl ImageIndex {
    pub fn new(manifests: Vec<Value>) -> Self {
        Self {
            schema_version: 2,
            media_type: media_type::OCI_IMAGE_INDEX.to_string(),
            manifests,
        }
    }
}

/// Descriptor for a leaf manifest in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub digest: String,
    pub size: i64,
    #[serde(rename = "artifactType", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

/// Platform information for a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub architecture: String,
}

impl Platform {
    /// Parse a `os/architecture` string (e.g. `linux/amd64`)
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s.split_once('/') {
            Some((os, arch)) if !os.is_empty() && !arch.is_empty() && !arch.contains('/') => {
                Ok(Self {
                    os: os.to_string(),
                    architecture: arch.to_string(),
                })
            }
            _ => Err(crate::Error::InvalidPlatform(s.to_string())),
        }
    }
}

/// The fields the assembler inspects on a fetched manifest document.
///
/// `mediaType` is required; a document without one is a decode error rather
/// than a leaf with an empty type.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedManifest {
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(rename = "artifactType")]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub manifests: Vec<Value>,
}

impl ParsedManifest {
    /// Whether this document is itself an image index
    pub fn is_index(&self) -> bool {
        self.media_type == media_type::OCI_IMAGE_INDEX
    }
}
