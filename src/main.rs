use clap::Parser;
use tracing::{error, info};
use ytbatch::cli::Cli;
use ytbatch::error::Result;
use ytbatch::{logging, Batch, YtDlpFetcher};

/// Main entry point for the application.
///
/// # Steps
/// 1. Initializes console logging
/// 2. Resolves the configuration from flags and an optional file
/// 3. Prepares the directories and the yt-dlp binaries
/// 4. Processes every URL file, stopping at the first fatal error
#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();
    info!("Starting ytbatch...");

    if let Err(e) = run(Cli::parse()).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("All URL files processed");
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve()?;
    config.ensure_dirs().await?;

    let fetcher = YtDlpFetcher::provision(&config).await?;
    let reports = Batch::new(config, fetcher).run().await?;

    let failed: usize = reports.iter().map(|r| r.failed()).sum();
    if failed > 0 {
        info!("{} downloads failed, see failed.txt in the output directory", failed);
    }
    Ok(())
}
