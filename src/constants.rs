/// Media type constants for OCI and Docker manifest documents
pub mod media_type {
    /// OCI image index (manifest list)
    pub const OCI_IMAGE_INDEX: &str = "application/vnd.oci.image.index.v1+json";

    /// OCI image manifest
    pub const OCI_IMAGE_MANIFEST: &str = "application/vnd.oci.image.manifest.v1+json";

    /// Docker manifest list
    pub const DOCKER_MANIFEST_LIST: &str =
        "application/vnd.docker.distribution.manifest.list.v2+json";

    /// Docker image manifest
    pub const DOCKER_MANIFEST: &str = "application/vnd.docker.distribution.manifest.v2+json";
}

/// Default target matrix applied in templated remote mode
pub mod matrix {
    /// Platforms enumerated when none are configured
    pub const DEFAULT_PLATFORMS: &[&str] = &["linux/amd64"];

    /// Artifact kinds enumerated when none are configured
    pub const DEFAULT_KINDS: &[&str] = &["docker", "oras"];
}
