//! HTTP transport construction
//!
//! Turns the TLS and timeout settings of a [`ClientConfig`] into a
//! configured `reqwest::Client`. Certificate files are read here, so
//! unusable material is reported when the client is built, not per request.

use std::fs;
use std::path::Path;

use reqwest::{Certificate, Client, Identity};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub(crate) fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let tls = config.tls();
    let mut builder =
        Client::builder().user_agent(concat!("chartpush/", env!("CARGO_PKG_VERSION")));

    if let Some(ca_file) = &tls.ca_file {
        let pem = read_material(ca_file, "CA file")?;
        let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
            ClientError::Configuration(format!("invalid CA file {}: {}", ca_file.display(), e))
        })?;
        if certificates.is_empty() {
            return Err(ClientError::Configuration(format!(
                "CA file {} contains no certificates",
                ca_file.display()
            )));
        }

        debug!(ca_file = %ca_file.display(), count = certificates.len(), "trusting additional CAs");
        for certificate in certificates {
            builder = builder.add_root_certificate(certificate);
        }
    }

    match (&tls.cert_file, &tls.key_file) {
        (Some(cert_file), Some(key_file)) => {
            let cert_pem = read_material(cert_file, "certificate file")?;
            let key_pem = read_material(key_file, "key file")?;
            // Accepts PKCS#1, PKCS#8 and SEC1 keys
            let identity = Identity::from_pem(&[cert_pem, key_pem].join(&b'\n')).map_err(|e| {
                ClientError::Configuration(format!(
                    "invalid client certificate {} / key {}: {}",
                    cert_file.display(),
                    key_file.display(),
                    e
                ))
            })?;
            debug!(cert_file = %cert_file.display(), "using client certificate");
            builder = builder.identity(identity);
        }
        (None, None) => {}
        _ => {
            return Err(ClientError::Configuration(
                "client certificate and key must be supplied together".to_string(),
            ));
        }
    }

    if tls.insecure_skip_verify {
        warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {}", e)))
}

fn read_material(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        ClientError::Configuration(format!("failed to read {} {}: {}", what, path.display(), e))
    })
}
