//! Registry credential lookup
//!
//! Resolves credentials for a registry from Docker config files, the same
//! locations `docker login` writes to. Only static auth entries are
//! supported; credential helper binaries are not executed.

use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Credentials resolved for a registry
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth: Option<String>,
}

impl AuthConfig {
    pub fn is_anonymous(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.auth.is_none()
    }

    /// Convert to an HTTP Authorization header value, if any
    pub fn to_authorization_header(&self) -> Option<String> {
        if let Some(auth) = &self.auth {
            return Some(format!("Basic {}", auth));
        }

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", username, password));
            return Some(format!("Basic {}", encoded));
        }

        None
    }
}

/// Docker config file structure (the `auths` section)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockerConfig {
    #[serde(default)]
    pub auths: HashMap<String, DockerAuthEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerAuthEntry {
    pub auth: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolves registry credentials from Docker config files
#[derive(Debug, Clone, Default)]
pub struct DefaultKeychain;

impl DefaultKeychain {
    pub fn new() -> Self {
        Self
    }

    /// Paths checked for a Docker config, in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(docker_config) = std::env::var("DOCKER_CONFIG") {
            paths.push(PathBuf::from(docker_config).join("config.json"));
        }

        if let Ok(auth_file) = std::env::var("REGISTRY_AUTH_FILE") {
            paths.push(PathBuf::from(auth_file));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".docker/config.json"));
        }

        paths
    }

    fn load_config() -> DockerConfig {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<DockerConfig>(&content) {
                    Ok(config) => {
                        debug!("Loaded Docker config from: {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse Docker config at {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read Docker config at {}: {}", path.display(), e);
                }
            }
        }

        DockerConfig::default()
    }

    /// Registry name variants an auth entry may be stored under
    fn registry_variants(registry: &str) -> Vec<String> {
        let mut variants = vec![registry.to_string()];

        if registry == "docker.io" || registry == "index.docker.io" {
            variants.push("docker.io".to_string());
            variants.push("index.docker.io".to_string());
            variants.push("https://index.docker.io/v1/".to_string());
        } else {
            variants.push(format!("https://{}", registry));
            variants.push(format!("https://{}/v2/", registry));
        }

        variants
    }

    /// Resolve credentials for a registry, anonymous when none are found
    pub fn resolve(&self, registry: &str) -> AuthConfig {
        let config = Self::load_config();

        for variant in Self::registry_variants(registry) {
            if let Some(entry) = config.auths.get(&variant) {
                debug!("Found auth entry for {}", registry);
                return AuthConfig {
                    username: entry.username.clone(),
                    password: entry.password.clone(),
                    auth: entry.auth.clone(),
                };
            }
        }

        debug!("No credentials found for {}, using anonymous", registry);
        AuthConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_anonymous() {
        let auth = AuthConfig::default();
        assert!(auth.is_anonymous());
        assert_eq!(auth.to_authorization_header(), None);
    }

    #[test]
    fn test_auth_config_basic() {
        let auth = AuthConfig {
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            auth: None,
        };
        assert!(!auth.is_anonymous());

        let expected = base64::engine::general_purpose::STANDARD.encode("user:pass");
        assert_eq!(
            auth.to_authorization_header(),
            Some(format!("Basic {}", expected))
        );
    }

    #[test]
    fn test_auth_config_preencoded() {
        let auth = AuthConfig {
            username: None,
            password: None,
            auth: Some("dXNlcjpwYXNz".to_string()),
        };
        assert_eq!(
            auth.to_authorization_header(),
            Some("Basic dXNlcjpwYXNz".to_string())
        );
    }

    #[test]
    fn test_registry_variants() {
        let variants = DefaultKeychain::registry_variants("docker.io");
        assert!(variants.contains(&"index.docker.io".to_string()));

        let variants = DefaultKeychain::registry_variants("gcr.io");
        assert!(variants.contains(&"gcr.io".to_string()));
        assert!(variants.contains(&"https://gcr.io".to_string()));
    }
}
