//! Request target derivation

use std::path::Path;

use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// `<base path>/<path>/<name>/<file name of local_path>`
pub(crate) fn upload_url(config: &ClientConfig, name: &str, local_path: &Path) -> Result<Url> {
    let file_name = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ClientError::InvalidTarget(format!("`{}` has no file name", local_path.display()))
        })?;

    for part in config.path().into_iter().chain([name]) {
        if split_segments(part).any(|segment| segment == "..") {
            return Err(ClientError::InvalidTarget(format!(
                "`{}` must not contain `..` segments",
                part
            )));
        }
    }

    let base = config.base_url();
    let segments: Vec<&str> = split_segments(base.path())
        .chain(config.path().into_iter().flat_map(split_segments))
        .chain(split_segments(name))
        .chain(std::iter::once(file_name))
        .collect();

    Ok(with_segments(base, &segments))
}

/// `<prefix>/api/helm/<repo>/reindex`, where the base URL path is `<prefix>/<repo>`
pub(crate) fn reindex_url(config: &ClientConfig) -> Result<Url> {
    let base = config.base_url();
    let mut segments: Vec<&str> = split_segments(base.path()).collect();
    let repo = segments.pop().ok_or_else(|| {
        ClientError::InvalidTarget(format!("base URL `{}` does not name a repository", base))
    })?;

    segments.extend(["api", "helm", repo, "reindex"]);
    Ok(with_segments(base, &segments))
}

/// Non-empty path segments, the way a path join normalises them
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_path(&format!("/{}", segments.join("/")));
    url
}
