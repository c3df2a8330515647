//! Source resolution
//!
//! Turns a declarative list of "what manifests to include" into concrete
//! (raw bytes, declared platform) pairs for the assembler. Two mutually
//! exclusive modes: templated remote fetch over a platform/kind matrix, and
//! explicit local files with optional platform annotations.

use std::path::Path;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::Platform;
use crate::registry::RegistryClient;


/// One manifest to include in the index: its raw bytes plus the platform
/// the caller declared for it, if any. The platform is never parsed out of
/// the bytes.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    /// The reference or path the bytes came from, for error context
    pub origin: String,
    pub bytes: Vec<u8>,
    pub platform: Option<Platform>,
}

/// One (os, architecture, kind) entry of the templated remote matrix
#[derive(Debug, Clone)]
pub struct Target {
    pub os: String,
    pub architecture: String,
    pub kind: String,
}

impl Target {
    /// The image reference for this target under a base reference
    pub fn reference(&self, base: &str) -> String {
        format!("{}-{}-{}-{}", base, self.os, self.architecture, self.kind)
    }

    pub fn platform(&self) -> Platform {
        Platform {
            os: self.os.clone(),
            architecture: self.architecture.clone(),
        }
    }
}

/// Expand a platform list and kind list into their cartesian product,
/// preserving enumeration order: platforms outermost, kinds innermost.
pub fn expand_targets(platforms: &[String], kinds: &[String]) -> Result<Vec<Target>> {
    let mut targets = Vec::new();
    for platform in platforms {
        let parsed = Platform::parse(platform)?;
        for kind in kinds {
            targets.push(Target {
                os: parsed.os.clone(),
                architecture: parsed.architecture.clone(),
                kind: kind.clone(),
            });
        }
    }
    Ok(targets)
}

/// Fetch every target's manifest from the registry.
///
/// Fetches run concurrently, but results are merged by matrix position so
/// the output order matches the enumeration order no matter which fetch
/// finishes first. The first failure aborts the whole run.
pub async fn resolve_remote(
    client: &RegistryClient,
    base: &str,
    targets: &[Target],
) -> Result<Vec<ManifestSource>> {
    info!("Fetching {} manifests for {}", targets.len(), base);

    let mut tasks = JoinSet::new();
    for (position, target) in targets.iter().enumerate() {
        let client = client.clone();
        let reference = target.reference(base);
        let platform = target.platform();
        tasks.spawn(async move {
            debug!("Fetching manifest {}", reference);
            let bytes = client.fetch_manifest(&reference).await?;
            Ok::<_, Error>((
                position,
                ManifestSource {
                    origin: reference,
                    bytes,
                    platform: Some(platform),
                },
            ))
        });
    }

    let mut slots: Vec<Option<ManifestSource>> = targets.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (position, source) = joined.map_err(|e| Error::Fetch {
            reference: base.to_string(),
            reason: format!("fetch task failed: {}", e),
        })??;
        slots[position] = Some(source);
    }

    Ok(slots
        .into_iter()
        .map(|slot| slot.expect("every fetch task fills its slot"))
        .collect())
}

/// Read manifests from local files, each optionally annotated
/// `:<os>/<arch>`.
pub fn resolve_local(specs: &[String]) -> Result<Vec<ManifestSource>> {
    specs
        .iter()
        .map(|spec| {
            let (path, platform) = parse_annotated_reference(spec);
            debug!("Reading manifest {}", path);

            if !Path::new(&path).exists() {
                return Err(Error::NotFound(path));
            }
            let bytes = std::fs::read(&path).map_err(|e| Error::Read {
                path: path.clone(),
                source: e,
            })?;

            Ok(ManifestSource {
                origin: path,
                bytes,
                platform,
            })
        })
        .collect()
}

/// Split a `path[:os/arch]` spec into the path and its platform annotation.
///
/// Only the rightmost colon-delimited segment is considered, and only when
/// it has the exact `os/arch` shape; anything else is part of the path, so
/// paths containing colons still work.
pub fn parse_annotated_reference(spec: &str) -> (String, Option<Platform>) {
    if let Some((path, suffix)) = spec.rsplit_once(':') {
        if let Ok(platform) = Platform::parse(suffix) {
            return (path.to_string(), Some(platform));
        }
    }
    (spec.to_string(), None)
}
