#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.platforms, vec!["linux/amd64"]);
        assert_eq!(config.kinds, vec!["docker", "oras"]);
    }

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
platforms = ["linux/amd64", "linux/arm64"]
kinds = ["docker"]
"#,
        )
        .unwrap();
        assert_eq!(config.platforms.len(), 2);
        assert_eq!(config.kinds, vec!["docker"]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(r#"platforms = ["linux/arm64"]"#).unwrap();
        assert_eq!(config.platforms, vec!["linux/arm64"]);
        assert_eq!(config.kinds, vec!["docker", "oras"]);
    }
}
