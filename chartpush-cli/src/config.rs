//! Configuration module
//!
//! Repository connection settings gathered from flags and `HELM_REPO_*`
//! environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chartpush_client::{ClientOptions, RepositoryClient};

/// CLI configuration
#[derive(Clone, Default)]
pub struct Config {
    /// Repository URL
    pub url: String,
    pub path: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub access_token: Option<String>,
    pub api_key: Option<String>,
    pub cert_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
    pub ca_file: Option<PathBuf>,
    /// Skip TLS verification
    pub insecure: bool,
    /// Seconds, 0 for none
    pub timeout: u64,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            anyhow::bail!("repository URL cannot be empty");
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            anyhow::bail!("repository URL must start with http:// or https://");
        }

        if self.cert_file.is_some() != self.key_file.is_some() {
            anyhow::bail!("--cert-file and --key-file must be given together");
        }

        Ok(())
    }

    /// Translate into client options
    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::new()
            .with_insecure_skip_verify(self.insecure)
            .with_timeout(self.timeout);

        if let Some(path) = &self.path {
            options = options.with_path(path);
        }
        if let Some(username) = &self.username {
            options = options.with_username(username);
        }
        if let Some(password) = &self.password {
            options = options.with_password(password);
        }
        if let Some(token) = &self.access_token {
            options = options.with_access_token(token);
        }
        if let Some(api_key) = &self.api_key {
            options = options.with_api_key(api_key);
        }
        if let Some(cert_file) = &self.cert_file {
            options = options.with_cert_file(cert_file);
        }
        if let Some(key_file) = &self.key_file {
            options = options.with_key_file(key_file);
        }
        if let Some(ca_file) = &self.ca_file {
            options = options.with_ca_file(ca_file);
        }

        options
    }

    /// Build a repository client from this configuration
    pub fn connect(&self) -> Result<RepositoryClient> {
        RepositoryClient::new(&self.url, self.client_options())
            .with_context(|| format!("Failed to configure client for {}", self.url))
    }
}
