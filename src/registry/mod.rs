use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::auth::DefaultKeychain;
use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// Media types offered when fetching a manifest by tag
const ACCEPT_MANIFEST: &str = concat!(
    "application/vnd.oci.image.index.v1+json, ",
    "application/vnd.oci.image.manifest.v1+json, ",
    "application/vnd.docker.distribution.manifest.list.v2+json, ",
    "application/vnd.docker.distribution.manifest.v2+json",
);

/// Client for fetching manifests from an OCI distribution registry
#[derive(Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    keychain: DefaultKeychain,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            keychain: DefaultKeychain::new(),
        }
    }

    /// Fetch the raw manifest bytes for an image reference.
    ///
    /// The bytes are returned exactly as served; descriptors derived from
    /// them stay verifiable against the registry's copy.
    pub async fn fetch_manifest(&self, reference: &str) -> Result<Vec<u8>> {
        let (registry, repository, tag) = parse_image_reference(reference);
        let url = format!(
            "https://{}/v2/{}/manifests/{}",
            registry_host(&registry),
            repository,
            tag
        );

        debug!("Fetching manifest from {}", url);

        let basic = self
            .keychain
            .resolve(&registry)
            .to_authorization_header();

        let mut request = self.client.get(&url).header(header::ACCEPT, ACCEPT_MANIFEST);
        if let Some(auth) = basic.as_deref() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| fetch_error(reference, &e))?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            self.retry_with_token(&url, &response_challenge(&response), basic.as_deref(), reference)
                .await?
        } else {
            response
        };

        if !response.status().is_success() {
            return Err(Error::Fetch {
                reference: reference.to_string(),
                reason: format!("registry returned {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(reference, &e))?;
        Ok(bytes.to_vec())
    }

    /// Exchange a Bearer challenge for a token and retry the request
    async fn retry_with_token(
        &self,
        url: &str,
        challenge: &Option<String>,
        basic: Option<&str>,
        reference: &str,
    ) -> Result<reqwest::Response> {
        let challenge = challenge
            .as_deref()
            .and_then(parse_bearer_challenge)
            .ok_or_else(|| Error::Fetch {
                reference: reference.to_string(),
                reason: "registry returned 401 Unauthorized".to_string(),
            })?;

        let mut token_url =
            reqwest::Url::parse(&challenge.realm).map_err(|e| Error::Fetch {
                reference: reference.to_string(),
                reason: format!("invalid token realm {}: {}", challenge.realm, e),
            })?;
        if let Some(service) = &challenge.service {
            token_url.query_pairs_mut().append_pair("service", service);
        }
        if let Some(scope) = &challenge.scope {
            token_url.query_pairs_mut().append_pair("scope", scope);
        }

        let mut token_request = self.client.get(token_url);
        if let Some(auth) = basic {
            token_request = token_request.header(header::AUTHORIZATION, auth);
        }

        let token_response = token_request
            .send()
            .await
            .map_err(|e| fetch_error(reference, &e))?;
        if !token_response.status().is_success() {
            return Err(Error::Fetch {
                reference: reference.to_string(),
                reason: format!("token endpoint returned {}", token_response.status()),
            });
        }

        let token: TokenResponse = token_response
            .json()
            .await
            .map_err(|e| fetch_error(reference, &e))?;

        self.client
            .get(url)
            .header(header::ACCEPT, ACCEPT_MANIFEST)
            .header(header::AUTHORIZATION, format!("Bearer {}", token.token))
            .send()
            .await
            .map_err(|e| fetch_error(reference, &e))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

fn fetch_error(reference: &str, err: &dyn std::fmt::Display) -> Error {
    Error::Fetch {
        reference: reference.to_string(),
        reason: err.to_string(),
    }
}

fn response_challenge(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// A parsed `WWW-Authenticate: Bearer` challenge
#[derive(Debug, PartialEq, Eq)]
struct BearerChallenge {
    realm: String,
    service: Option<String>,
    scope: Option<String>,
}

fn parse_bearer_challenge(header: &str) -> Option<BearerChallenge> {
    let params = header.strip_prefix("Bearer ")?;

    let mut realm = None;
    let mut service = None;
    let mut scope = None;
    for part in params.split(',') {
        if let Some((key, value)) = part.trim().split_once('=') {
            let value = value.trim_matches('"').to_string();
            match key {
                "realm" => realm = Some(value),
                "service" => service = Some(value),
                "scope" => scope = Some(value),
                _ => {}
            }
        }
    }

    Some(BearerChallenge {
        realm: realm?,
        service,
        scope,
    })
}

/// The registry host to connect to; Docker Hub pulls go through
/// registry-1.docker.io
fn registry_host(registry: &str) -> &str {
    match registry {
        "docker.io" | "index.docker.io" => "registry-1.docker.io",
        other => other,
    }
}

/// Split an image reference into (registry, repository, tag-or-digest).
///
/// Handles the usual shorthand: a missing registry means Docker Hub (with
/// the `library/` namespace for single-segment names) and a missing tag
/// means `latest`.
pub fn parse_image_reference(image: &str) -> (String, String, String) {
    // Digest references bind with '@' and may contain ':' in the digest
    let (name, reference) = if let Some((name, digest)) = image.split_once('@') {
        (name.to_string(), digest.to_string())
    } else {
        match name_and_tag(image) {
            (name, Some(tag)) => (name, tag),
            (name, None) => (name, "latest".to_string()),
        }
    };

    match name.split_once('/') {
        Some((first, rest)) if first.contains('.') || first.contains(':') => {
            (first.to_string(), rest.to_string(), reference)
        }
        Some(_) => ("docker.io".to_string(), name, reference),
        None => ("docker.io".to_string(), format!("library/{}", name), reference),
    }
}

fn name_and_tag(image: &str) -> (String, Option<String>) {
    match image.rsplit_once(':') {
        // A ':' inside the registry host (port) is not a tag separator
        Some((name, tag)) if !tag.contains('/') => (name.to_string(), Some(tag.to_string())),
        _ => (image.to_string(), None),
    }
}
