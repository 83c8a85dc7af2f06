use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Result of handling one URL line, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    Downloaded,
    /// The URL belongs to no known platform.
    Skipped,
    Failed { reason: String },
}

/// Tally of the URLs handled for one input file.
///
/// # Examples
///
/// ```
/// use ytbatch::progress::{FileReport, UrlOutcome};
///
/// let mut report = FileReport::new("list.txt", 2);
/// report.record("https://youtu.be/a", &UrlOutcome::Downloaded);
/// report.record("https://example.com", &UrlOutcome::Skipped);
/// assert_eq!(report.attempted(), 1);
/// ```
#[derive(Debug)]
pub struct FileReport {
    pub file: PathBuf,
    pub total_urls: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub start_time: Instant,
    failed_urls: Vec<(String, String)>, // (URL, error message)
}

impl FileReport {
    pub fn new(file: impl Into<PathBuf>, total_urls: usize) -> Self {
        Self {
            file: file.into(),
            total_urls,
            downloaded: 0,
            skipped: 0,
            start_time: Instant::now(),
            failed_urls: Vec::new(),
        }
    }

    pub fn record(&mut self, url: &str, outcome: &UrlOutcome) {
        match outcome {
            UrlOutcome::Downloaded => self.downloaded += 1,
            UrlOutcome::Skipped => self.skipped += 1,
            UrlOutcome::Failed { reason } => {
                self.failed_urls.push((url.to_string(), reason.clone()))
            }
        }
    }

    /// Number of URLs handed to the downloader.
    pub fn attempted(&self) -> usize {
        self.downloaded + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.failed_urls.len()
    }

    pub fn failures(&self) -> &[(String, String)] {
        &self.failed_urls
    }

    pub fn log_summary(&self) {
        info!(
            "{}: {} downloaded, {} failed, {} skipped of {} URLs in {:.1}s",
            self.file.display(),
            self.downloaded,
            self.failed(),
            self.skipped,
            self.total_urls,
            self.start_time.elapsed().as_secs_f64()
        );
    }

    /// Appends the failed URLs to `failed.txt` inside `output_dir`.
    ///
    /// Does nothing when every attempted URL succeeded.
    pub fn export_failures(&self, output_dir: &Path) -> std::io::Result<()> {
        if self.failed_urls.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_dir.join("failed.txt"))?;

        let mut writer = std::io::BufWriter::new(file);

        writeln!(
            writer,
            "\n=== Failed Downloads from {} ({}) ===",
            self.file.display(),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;

        for (url, error) in &self.failed_urls {
            writeln!(writer, "URL: {}", url)?;
            writeln!(writer, "Error: {}", error)?;
            writeln!(writer, "---")?;
        }

        writer.flush()?;
        Ok(())
    }
}
