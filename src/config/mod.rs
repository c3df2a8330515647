use serde::{Deserialize, Serialize};

use crate::constants::matrix;

#[cfg(test)]
mod tests;

/// Persistent configuration, loaded from `ocindex/config.toml` in the user
/// config directory when present.
///
/// The platform/kind matrix drives templated remote mode; keeping it here
/// means new platforms or artifact kinds do not require code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Platforms enumerated in templated remote mode (e.g. "linux/amd64")
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Artifact kinds enumerated in templated remote mode
    #[serde(default = "default_kinds")]
    pub kinds: Vec<String>,
}

fn default_platforms() -> Vec<String> {
    matrix::DEFAULT_PLATFORMS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_kinds() -> Vec<String> {
    matrix::DEFAULT_KINDS.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            kinds: default_kinds(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ocindex").join("config.toml");
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)?;
                let config: Config = toml::from_str(&content)?;
                return Ok(config);
            }
        }
        Ok(Config::default())
    }
}
