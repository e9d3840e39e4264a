//! Push command handler
//!
//! Uploads a chart tarball and, unless told otherwise, reindexes the
//! repository afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use chartpush_client::StatusCode;
use colored::*;
use tracing::info;

use super::reindex::reindex;
use crate::config::Config;

/// Handle the push command
pub async fn handle_push_command(
    tarball: &Path,
    name: Option<String>,
    skip_reindex: bool,
    config: &Config,
) -> Result<()> {
    let client = config.connect()?;

    let name = match name {
        Some(name) => name,
        None => chart_name_from_file(tarball)?,
    };

    let url = client.upload_url(&name, tarball)?;
    println!("Pushing {} to {}...", tarball.display().to_string().bold(), url);

    let response = client
        .upload_chart_package(&name, tarball)
        .await
        .with_context(|| format!("Failed to upload {}", tarball.display()))?;

    let status = response.status();
    if status != StatusCode::CREATED {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("upload rejected with status {}: {}", status, body.trim());
    }

    info!(chart = %name, %url, "chart uploaded");
    println!("{}", "✓ Chart pushed successfully!".green().bold());

    if skip_reindex {
        println!("{}", "Skipping reindex.".dimmed());
        return Ok(());
    }

    reindex(&client).await
}

/// Derive the chart name from a package file name
///
/// `mychart-0.1.0.tgz` becomes `mychart`: everything before the first `-`
/// that is followed by a digit. Chart metadata is not read.
pub fn chart_name_from_file(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid chart package path: {}", path.display()))?;

    let stem = file_name
        .strip_suffix(".tgz")
        .or_else(|| file_name.strip_suffix(".tar.gz"))
        .unwrap_or(file_name);

    let bytes = stem.as_bytes();
    let version_start = (1..bytes.len()).find(|&i| bytes[i - 1] == b'-' && bytes[i].is_ascii_digit());
    let name = match version_start {
        Some(i) => &stem[..i - 1],
        None => stem,
    };

    if name.is_empty() {
        anyhow::bail!(
            "cannot derive a chart name from {}; pass --name",
            file_name
        );
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_name_from_file() {
        let cases = [
            ("mychart-0.1.0.tgz", "mychart"),
            ("dist/my-chart-1.2.3.tgz", "my-chart"),
            ("my-chart-1.2.3-rc.1.tgz", "my-chart"),
            ("nginx-ingress-4.10.0.tar.gz", "nginx-ingress"),
            ("unversioned.tgz", "unversioned"),
        ];

        for (file, expected) in cases {
            assert_eq!(chart_name_from_file(Path::new(file)).unwrap(), expected);
        }
    }

    #[test]
    fn test_chart_name_requires_a_name() {
        assert!(chart_name_from_file(Path::new("-0.1.0.tgz")).is_err());
        assert!(chart_name_from_file(Path::new("/")).is_err());
    }
}
