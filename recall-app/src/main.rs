mod api;
mod cli;

use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;

use cli::opts::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let args = Cli::parse();
    let rt = Runtime::new()?;
    rt.block_on(api::server::run(args))
}
