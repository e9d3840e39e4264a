//! Reindex command handler

use anyhow::{Context, Result};
use chartpush_client::{RepositoryClient, StatusCode};
use colored::*;
use tracing::info;

use crate::config::Config;

/// Handle the reindex command
pub async fn handle_reindex_command(config: &Config) -> Result<()> {
    let client = config.connect()?;
    reindex(&client).await
}

/// Ask the repository to rebuild its index; anything but 200 is a failure
pub async fn reindex(client: &RepositoryClient) -> Result<()> {
    let url = client.reindex_url()?;
    println!("Reindexing {}...", url);

    let response = client
        .reindex_artifactory_repo()
        .await
        .context("Failed to reach repository for reindex")?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("reindex rejected with status {}: {}", status, body.trim());
    }

    info!(%url, "repository reindexed");
    println!("{}", "✓ Repository reindexed".green().bold());
    Ok(())
}
