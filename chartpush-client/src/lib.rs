//! Chartpush HTTP Client
//!
//! A small client for pushing packaged chart tarballs to an Artifactory-style
//! repository manager and asking it to rebuild the repository index.
//!
//! The client never interprets HTTP status codes: a `401` or `404` comes back
//! as an ordinary [`reqwest::Response`]. Only failures to send a request at
//! all are reported as errors.
//!
//! # Example
//!
//! ```no_run
//! use chartpush_client::{ClientOptions, RepositoryClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RepositoryClient::new(
//!         "https://artifactory.example.com/artifactory/helm-local",
//!         ClientOptions::new().with_username("user").with_access_token("token"),
//!     )?;
//!
//!     let response = client
//!         .upload_chart_package("mychart", "mychart-0.1.0.tgz")
//!         .await?;
//!     println!("upload returned {}", response.status());
//!
//!     let response = client.reindex_artifactory_repo().await?;
//!     println!("reindex returned {}", response.status());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
mod target;
mod tls;

// Re-export commonly used types
pub use auth::{API_KEY_HEADER, AuthHeader, resolve_auth};
pub use config::{ClientConfig, ClientOptions, TlsOptions};
pub use error::{ClientError, ErrorKind, Result};
pub use reqwest::{Response, StatusCode, Url};

use std::path::Path;

use reqwest::{Client, RequestBuilder};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// HTTP client for a single chart repository
///
/// Construction validates the configuration and prepares the transport;
/// no network I/O happens until an operation is called. The configuration
/// is immutable afterwards, so one instance can serve any number of
/// sequential or concurrent calls.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    /// Validated configuration
    config: ClientConfig,
    /// HTTP client carrying the TLS and timeout settings
    client: Client,
}

impl RepositoryClient {
    /// Create a new repository client
    ///
    /// # Arguments
    /// * `base_url` - Repository URL, e.g. "https://host/artifactory/helm-local"
    /// * `options` - Credentials, sub-path, TLS material and timeout
    ///
    /// # Errors
    /// [`ClientError::Configuration`] if the URL is invalid or the TLS
    /// material cannot be loaded.
    ///
    /// # Example
    /// ```
    /// use chartpush_client::{ClientOptions, RepositoryClient};
    ///
    /// let client = RepositoryClient::new(
    ///     "http://localhost:8081/artifactory/helm-local",
    ///     ClientOptions::new().with_api_key("apiKey"),
    /// )
    /// .unwrap();
    /// assert_eq!(client.config().api_key(), Some("apiKey"));
    /// ```
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self> {
        let config = ClientConfig::from_options(base_url, options)?;
        let client = tls::build_http_client(&config)?;

        Ok(Self { config, client })
    }

    /// Get the validated configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL a chart package would be uploaded to
    pub fn upload_url(&self, name: &str, local_path: impl AsRef<Path>) -> Result<Url> {
        target::upload_url(&self.config, name, local_path.as_ref())
    }

    /// URL of the reindex endpoint for this repository
    pub fn reindex_url(&self) -> Result<Url> {
        target::reindex_url(&self.config)
    }

    // =============================================================================
    // Operations
    // =============================================================================

    /// Upload a packaged chart
    ///
    /// Sends `PUT <base><path>/<name>/<file name>` with the file contents as
    /// body. The local file is read before any request is made.
    ///
    /// # Arguments
    /// * `name` - Chart name, used as the directory under the repository path
    /// * `local_path` - Path to the chart tarball
    ///
    /// # Returns
    /// The raw response, whatever its status code
    pub async fn upload_chart_package(
        &self,
        name: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<Response> {
        let local_path = local_path.as_ref();
        let body = read_package(local_path).await?;
        let url = self.upload_url(name, local_path)?;

        debug!(%url, bytes = body.len(), "uploading chart package");
        let request = self.authorize(self.client.put(url).body(body));

        Ok(request.send().await?)
    }

    /// Trigger a reindex of the Helm repository
    ///
    /// Sends `POST <prefix>/api/helm/<repo>/reindex` with no body.
    ///
    /// # Returns
    /// The raw response, whatever its status code
    pub async fn reindex_artifactory_repo(&self) -> Result<Response> {
        let url = self.reindex_url()?;

        debug!(%url, "reindexing repository");
        let request = self.authorize(self.client.post(url));

        Ok(request.send().await?)
    }

    /// Attach credentials, resolved fresh for every request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match resolve_auth(&self.config) {
            Some(auth) => {
                debug!(scheme = auth.scheme(), "attaching credentials");
                auth.apply(request)
            }
            None => request,
        }
    }
}

/// Read the whole package; the file handle is dropped before returning
async fn read_package(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)
        .await
        .map_err(|e| ClientError::io(path, e))?;

    let mut body = Vec::new();
    file.read_to_end(&mut body)
        .await
        .map_err(|e| ClientError::io(path, e))?;

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RepositoryClient::new(
            "http://localhost:8081/artifactory/helm-local",
            ClientOptions::new(),
        )
        .unwrap();
        assert_eq!(
            client.config().base_url().as_str(),
            "http://localhost:8081/artifactory/helm-local"
        );
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let err = RepositoryClient::new("jaswehfgew", ClientOptions::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_client_target_urls() {
        let client = RepositoryClient::new(
            "http://localhost:8081/artifactory/helm-local",
            ClientOptions::new().with_path("charts"),
        )
        .unwrap();

        assert_eq!(
            client
                .upload_url("mychart", "dist/mychart-0.1.0.tgz")
                .unwrap()
                .path(),
            "/artifactory/helm-local/charts/mychart/mychart-0.1.0.tgz"
        );
        assert_eq!(
            client.reindex_url().unwrap().path(),
            "/artifactory/api/helm/helm-local/reindex"
        );
    }

    #[tokio::test]
    async fn test_read_package_missing_file() {
        let err = read_package(Path::new("/non/existent/path/mychart-0.1.0.tgz"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<RepositoryClient>();
    }
}
