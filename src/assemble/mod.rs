//! Index assembly
//!
//! Consumes resolved manifest sources, classifies each as an index (whose
//! entries are flattened verbatim) or a leaf (for which a descriptor is
//! computed), and renders the final OCI image index document.

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::manifest::{Descriptor, ImageIndex, ParsedManifest};
use crate::source::ManifestSource;


/// Behavior knobs for assembly and rendering.
///
/// Remote mode defaults to natural key order with a platform required on
/// every leaf; local mode defaults to sorted, byte-reproducible output with
/// platforms optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    /// Render with lexicographically sorted keys at every level and a
    /// deterministic manifest order
    pub sort_output: bool,
    /// Require (and emit) a declared platform for every leaf source
    pub always_emit_platform: bool,
}

/// Build an image index from the resolved sources, in order.
pub fn assemble(sources: &[ManifestSource], options: &AssembleOptions) -> Result<ImageIndex> {
    let mut manifests = Vec::new();

    for source in sources {
        let parsed: ParsedManifest =
            serde_json::from_slice(&source.bytes).map_err(|e| Error::Decode {
                origin: source.origin.clone(),
                source: e,
            })?;

        if parsed.is_index() {
            // Nested entries already carry their own platform, if any; the
            // declared platform for the containing source is ignored.
            debug!(
                "Flattening index {} ({} entries)",
                source.origin,
                parsed.manifests.len()
            );
            manifests.extend(parsed.manifests);
        } else {
            manifests.push(serde_json::to_value(leaf_descriptor(
                source, parsed, options,
            )?)?);
        }
    }

    Ok(ImageIndex::new(manifests))
}

/// Compute the descriptor for a leaf manifest.
///
/// Digest and size come from the raw bytes exactly as fetched, never a
/// re-serialized form, so the descriptor stays verifiable against the
/// original content.
fn leaf_descriptor(
    source: &ManifestSource,
    parsed: ParsedManifest,
    options: &AssembleOptions,
) -> Result<Descriptor> {
    if options.always_emit_platform && source.platform.is_none() {
        return Err(Error::MissingPlatform(source.origin.clone()));
    }

    Ok(Descriptor {
        media_type: parsed.media_type,
        digest: format!("sha256:{}", sha256::digest(source.bytes.as_slice())),
        size: source.bytes.len() as i64,
        artifact_type: parsed.artifact_type,
        platform: source.platform.clone(),
    })
}

/// Serialize the index according to the configured policy.
///
/// Natural mode keeps field declaration order and flattened entries'
/// original key order. Sorted mode sorts object keys recursively and orders
/// the manifests array by each entry's serialized form, so the same logical
/// input set renders byte-identically regardless of source order.
pub fn render(index: &ImageIndex, options: &AssembleOptions) -> Result<String> {
    let mut value = serde_json::to_value(index)?;
    if options.sort_output {
        value = sort_keys(value);
        if let Some(entries) = value
            .get_mut("manifests")
            .and_then(|m| m.as_array_mut())
        {
            entries.sort_by_key(|entry| entry.to_string());
        }
    }
    Ok(value.to_string())
}

/// Rebuild a JSON value with object keys in lexicographic order at every
/// level
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
