use crate::archiver::archive;
use crate::downloader::Fetcher;
use crate::error::{AppError, Result};
use crate::options::DownloadConfig;
use crate::platform::classify;
use crate::progress::{FileReport, UrlOutcome};
use crate::scanner::{read_urls, scan_input_dir};
use crate::Config;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Runs URL files through a [`Fetcher`] one after another.
///
/// # Examples
/// ```no_run
/// use ytbatch::{Batch, Config, YtDlpFetcher};
///
/// async fn example() -> ytbatch::error::Result<()> {
///     let config = Config::default();
///     let fetcher = YtDlpFetcher::provision(&config).await?;
///     Batch::new(config, fetcher).run().await?;
///     Ok(())
/// }
/// ```
pub struct Batch<F> {
    config: Config,
    fetcher: F,
}

impl<F: Fetcher> Batch<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes every `.txt` file in the input directory.
    ///
    /// # Errors
    /// Stops at the first fatal error; files not reached yet stay in the
    /// input directory.
    pub async fn run(&self) -> Result<Vec<FileReport>> {
        let files = scan_input_dir(&self.config.input_dir).await?;
        info!(
            "Found {} URL files in {}",
            files.len(),
            self.config.input_dir.display()
        );

        let mut reports = Vec::with_capacity(files.len());
        for file in files {
            reports.push(self.process_file(&file).await?);
        }
        Ok(reports)
    }

    /// Attempts every URL of one file, then moves the file to the processed
    /// directory.
    #[instrument(skip(self))]
    pub async fn process_file(&self, path: &Path) -> Result<FileReport> {
        let urls = read_urls(path).await?;
        info!("Processing {} URLs", urls.len());
        let mut report = FileReport::new(path, urls.len());

        for url in &urls {
            let outcome = self.process_url(url).await?;
            report.record(url, &outcome);
        }

        archive(path, &self.config.processed_dir, self.config.on_conflict).await?;

        report.log_summary();
        if let Err(e) = report.export_failures(&self.config.output_dir) {
            warn!("Failed to export failure report: {}", e);
        }
        Ok(report)
    }

    /// Classifies and downloads a single URL.
    ///
    /// Only fatal errors are returned as `Err`.
    pub async fn process_url(&self, url: &str) -> Result<UrlOutcome> {
        let platform = classify(url);
        let Some(options) = DownloadConfig::for_platform(platform, &self.config.output_dir) else {
            warn!("Unknown URL platform for {}. Skipping.", url);
            return Ok(UrlOutcome::Skipped);
        };

        info!("Downloading {} ({})", url, platform);
        match self.fetcher.fetch(url, &options).await {
            Ok(()) => Ok(UrlOutcome::Downloaded),
            Err(AppError::DownloadFailed { reason, .. }) => {
                error!("Failed to download {}: {}", url, reason);
                Ok(UrlOutcome::Failed { reason })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FailingOn {
        pattern: &'static str,
        seen: Mutex<Vec<DownloadConfig>>,
    }

    #[async_trait]
    impl Fetcher for FailingOn {
        async fn fetch(&self, url: &str, options: &DownloadConfig) -> Result<()> {
            self.seen.lock().unwrap().push(options.clone());
            if !self.pattern.is_empty() && url.contains(self.pattern) {
                return Err(AppError::DownloadFailed {
                    url: url.to_string(),
                    reason: "ERROR: gone".to_string(),
                });
            }
            Ok(())
        }
    }

    fn batch(fetcher: FailingOn) -> Batch<FailingOn> {
        Batch::new(Config::default(), fetcher)
    }

    #[tokio::test]
    async fn unknown_url_is_skipped_without_fetching() {
        let batch = batch(FailingOn::default());
        let outcome = batch.process_url("https://example.org/v").await.unwrap();
        assert_eq!(outcome, UrlOutcome::Skipped);
        assert!(batch.fetcher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_entry_is_skipped() {
        let batch = batch(FailingOn::default());
        assert_eq!(batch.process_url("").await.unwrap(), UrlOutcome::Skipped);
        assert!(batch.fetcher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn platform_selects_options() {
        let batch = batch(FailingOn::default());
        batch.process_url("https://youtu.be/a").await.unwrap();
        batch.process_url("https://vimeo.com/1").await.unwrap();

        let seen = batch.fetcher.seen.lock().unwrap();
        assert_eq!(seen[0].format, "bestvideo+bestaudio/best");
        assert_eq!(seen[1].format, "best");
    }

    #[tokio::test]
    async fn download_failure_becomes_outcome() {
        let batch = batch(FailingOn {
            pattern: "vimeo",
            ..FailingOn::default()
        });
        let outcome = batch.process_url("https://vimeo.com/1").await.unwrap();
        assert_eq!(
            outcome,
            UrlOutcome::Failed {
                reason: "ERROR: gone".to_string()
            }
        );
    }
}
