#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_parse_image_reference() {
        let (registry, repo, tag) = parse_image_reference("docker.io/library/hello-world:latest");
        assert_eq!(registry, "docker.io");
        assert_eq!(repo, "library/hello-world");
        assert_eq!(tag, "latest");
    }

    #[test]
    fn test_parse_image_reference_no_tag() {
        let (_, _, tag) = parse_image_reference("docker.io/library/hello-world");
        assert_eq!(tag, "latest");
    }

    #[test]
    fn test_parse_image_reference_with_port() {
        let (registry, repo, tag) = parse_image_reference("localhost:5000/myapp:v1.0");
        assert_eq!(registry, "localhost:5000");
        assert_eq!(repo, "myapp");
        assert_eq!(tag, "v1.0");
    }

    #[test]
    fn test_parse_image_reference_port_without_tag() {
        let (registry, repo, tag) = parse_image_reference("localhost:5000/myapp");
        assert_eq!(registry, "localhost:5000");
        assert_eq!(repo, "myapp");
        assert_eq!(tag, "latest");
    }

    #[test]
    fn test_parse_image_reference_implicit_registry() {
        let (registry, repo, tag) = parse_image_reference("ubuntu:22.04");
        assert_eq!(registry, "docker.io");
        assert_eq!(repo, "library/ubuntu");
        assert_eq!(tag, "22.04");

        let (registry, repo, _) = parse_image_reference("user/image:tag");
        assert_eq!(registry, "docker.io");
        assert_eq!(repo, "user/image");
    }

    #[test]
    fn test_parse_image_reference_digest() {
        let (registry, repo, reference) = parse_image_reference(
            "ghcr.io/org/app@sha256:0000000000000000000000000000000000000000000000000000000000000000",
        );
        assert_eq!(registry, "ghcr.io");
        assert_eq!(repo, "org/app");
        assert!(reference.starts_with("sha256:"));
    }

    #[test]
    fn test_registry_host_docker_hub() {
        assert_eq!(registry_host("docker.io"), "registry-1.docker.io");
        assert_eq!(registry_host("index.docker.io"), "registry-1.docker.io");
        assert_eq!(registry_host("ghcr.io"), "ghcr.io");
    }

    #[test]
    fn test_parse_bearer_challenge() {
        let challenge = parse_bearer_challenge(
            r#"Bearer realm="https://auth.docker.io/token",service="registry.docker.io",scope="repository:library/ubuntu:pull""#,
        )
        .unwrap();
        assert_eq!(challenge.realm, "https://auth.docker.io/token");
        assert_eq!(challenge.service.as_deref(), Some("registry.docker.io"));
        assert_eq!(
            challenge.scope.as_deref(),
            Some("repository:library/ubuntu:pull")
        );
    }

    #[test]
    fn test_parse_bearer_challenge_not_bearer() {
        assert!(parse_bearer_challenge(r#"Basic realm="registry""#).is_none());
    }

    #[test]
    fn test_parse_bearer_challenge_missing_realm() {
        assert!(parse_bearer_challenge(r#"Bearer service="registry""#).is_none());
    }
}
