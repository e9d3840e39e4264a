//! Client configuration
//!
//! [`ClientOptions`] collects the named options a caller may supply.
//! [`ClientConfig`] is the validated, immutable form the client keeps.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Result};

/// TLS material for talking to the repository manager
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// PEM client certificate for mutual TLS
    pub cert_file: Option<PathBuf>,
    /// PEM private key matching `cert_file` (PKCS#1, PKCS#8 or SEC1)
    pub key_file: Option<PathBuf>,
    /// PEM CA bundle; every certificate in it is trusted alongside the built-in roots
    pub ca_file: Option<PathBuf>,
    /// Disable server certificate validation entirely.
    ///
    /// Insecure; intended for development and test servers only.
    pub insecure_skip_verify: bool,
}

/// Options applied when constructing a [`crate::RepositoryClient`]
///
/// # Example
/// ```
/// use chartpush_client::ClientOptions;
///
/// let options = ClientOptions::new()
///     .with_username("user")
///     .with_password("pass")
///     .with_path("/my/path")
///     .with_timeout(30);
/// ```
#[derive(Clone, Default)]
pub struct ClientOptions {
    path: Option<String>,
    username: Option<String>,
    password: Option<String>,
    access_token: Option<String>,
    api_key: Option<String>,
    tls: TlsOptions,
    timeout_secs: u64,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-path inserted between the base URL and the chart segments
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_cert_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls.cert_file = Some(path.into());
        self
    }

    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls.key_file = Some(path.into());
        self
    }

    pub fn with_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls.ca_file = Some(path.into());
        self
    }

    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.tls.insecure_skip_verify = insecure;
        self
    }

    /// Request timeout in seconds; 0 leaves the transport default in place
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("access_token", &redact(&self.access_token))
            .field("api_key", &redact(&self.api_key))
            .field("tls", &self.tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Validated client configuration
///
/// Immutable once built. Empty strings supplied as options are treated as
/// unset so they never take part in authentication.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    path: Option<String>,
    username: Option<String>,
    password: Option<String>,
    access_token: Option<String>,
    api_key: Option<String>,
    tls: TlsOptions,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validate `base_url` and apply `options`
    ///
    /// Fails with [`ClientError::Configuration`] when the URL is not an
    /// absolute http(s) URL.
    pub fn from_options(base_url: &str, options: ClientOptions) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        Ok(Self {
            base_url,
            path: non_empty(options.path),
            username: non_empty(options.username),
            password: non_empty(options.password),
            access_token: non_empty(options.access_token),
            api_key: non_empty(options.api_key),
            tls: options.tls,
            timeout: (options.timeout_secs > 0).then(|| Duration::from_secs(options.timeout_secs)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn tls(&self) -> &TlsOptions {
        &self.tls
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("access_token", &redact(&self.access_token))
            .field("api_key", &redact(&self.api_key))
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Configuration(format!("invalid base URL `{}`: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::Configuration(format!(
            "base URL `{}` must use http or https",
            raw
        )));
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ClientError::Configuration(format!(
            "base URL `{}` has no host",
            raw
        )));
    }

    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_options() {
        let config = ClientConfig::from_options(
            "http://localhost:8081/artifactory/helm-local",
            ClientOptions::new()
                .with_username("user")
                .with_password("pass")
                .with_path("/my/path")
                .with_timeout(5),
        )
        .unwrap();

        assert_eq!(config.base_url().path(), "/artifactory/helm-local");
        assert_eq!(config.path(), Some("/my/path"));
        assert_eq!(config.username(), Some("user"));
        assert_eq!(config.password(), Some("pass"));
        assert_eq!(config.access_token(), None);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert!(!config.tls().insecure_skip_verify);
    }

    #[test]
    fn test_zero_timeout_means_no_override() {
        let config =
            ClientConfig::from_options("http://localhost", ClientOptions::new().with_timeout(0))
                .unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let config = ClientConfig::from_options(
            "http://localhost",
            ClientOptions::new()
                .with_username("")
                .with_access_token("")
                .with_path(""),
        )
        .unwrap();

        assert_eq!(config.username(), None);
        assert_eq!(config.access_token(), None);
        assert_eq!(config.path(), None);
    }

    #[test]
    fn test_invalid_base_urls() {
        for raw in ["jaswehfgew", "", "ftp://example.com/repo", "mailto:someone@example.com"] {
            let err = ClientConfig::from_options(raw, ClientOptions::new()).unwrap_err();
            assert!(
                matches!(err, ClientError::Configuration(_)),
                "expected configuration error for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let options = ClientOptions::new()
            .with_password("hunter2")
            .with_access_token("secret-token")
            .with_api_key("secret-key");
        let rendered = format!("{:?}", options);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("secret-token"));

        let config = ClientConfig::from_options("https://repo.example.com/helm", options).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
