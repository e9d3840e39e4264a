//! Chartpush CLI
//!
//! Pushes packaged chart tarballs to an Artifactory Helm repository and
//! triggers a reindex.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chartpush")]
#[command(about = "Push Helm chart packages to Artifactory", long_about = None)]
struct Cli {
    /// Repository URL, e.g. https://host/artifactory/helm-local
    #[arg(long, env = "HELM_REPO_URL")]
    url: String,

    /// Sub-path inserted between the repository URL and the chart
    #[arg(long, env = "HELM_REPO_CONTEXT_PATH")]
    path: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, env = "HELM_REPO_USERNAME")]
    username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, env = "HELM_REPO_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Access token (sent as Bearer, or as basic auth with --username)
    #[arg(long, env = "HELM_REPO_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// API key (sent as X-JFrog-Art-Api, or as basic auth with --username)
    #[arg(long, env = "HELM_REPO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// PEM client certificate for mutual TLS
    #[arg(long, env = "HELM_REPO_CERT_FILE")]
    cert_file: Option<PathBuf>,

    /// PEM private key for the client certificate
    #[arg(long, env = "HELM_REPO_KEY_FILE")]
    key_file: Option<PathBuf>,

    /// Additional CA bundle to trust
    #[arg(long, env = "HELM_REPO_CA_FILE")]
    ca_file: Option<PathBuf>,

    /// Skip server certificate verification (insecure)
    #[arg(
        long,
        env = "HELM_REPO_INSECURE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    insecure: bool,

    /// Request timeout in seconds (0 for no timeout)
    #[arg(long, env = "HELM_REPO_TIMEOUT", default_value = "0")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartpush=info,chartpush_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        url: cli.url,
        path: cli.path,
        username: cli.username,
        password: cli.password,
        access_token: cli.access_token,
        api_key: cli.api_key,
        cert_file: cli.cert_file,
        key_file: cli.key_file,
        ca_file: cli.ca_file,
        insecure: cli.insecure,
        timeout: cli.timeout,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
