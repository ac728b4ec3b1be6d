use clap::Parser;

use vidgate::cli::{self, Cli};
use vidgate::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(&err, json);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli::load_config(&cli)?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let service = cli::build_service(&config).await?;

    // Drop whatever expired since the last run
    service.clear_expired_cache().await;

    cli::run(cli, &config, &service).await
}
