mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigArgs};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "chart-bump",
    author,
    version,
    about = "Check that every changed chart in a pull request bumps its version"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() {
    init_tracing();

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config)?;

    let github = Arc::new(GitHubClient::new(
        config.api_base_url.clone(),
        config.per_page,
    ));
    let context = AppContext::new(config, github);

    cmd::check::run(&context).await
}
