//! Batch downloader for video URLs listed in text files.
//!
//! Each `.txt` file in the input directory holds one URL per line. YouTube
//! and Vimeo URLs are downloaded with yt-dlp; once every line of a file has
//! been tried, the file is moved to the processed directory.
//!
//! # Architecture
//!
//! - `scanner`: finds URL files and reads their lines
//! - `platform`: recognizes the video host of a URL
//! - `options`: yt-dlp options per host
//! - `downloader`: the [`Fetcher`] seam and its yt-dlp implementation
//! - `batch`: the sequential file-by-file loop
//! - `archiver`: moves handled files away
//! - `progress`: per-file outcome tally and failure report
//!
//! # Example
//! ```no_run
//! use ytbatch::{Batch, Config, YtDlpFetcher};
//!
//! async fn example() {
//!     let config = Config::default();
//!     let fetcher = YtDlpFetcher::provision(&config).await.unwrap();
//!     let reports = Batch::new(config, fetcher).run().await.unwrap();
//! }
//! ```

pub mod archiver;
pub mod batch;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod options;
pub mod platform;
pub mod progress;
pub mod scanner;

// Re-export commonly used items
pub use batch::Batch;
pub use config::{Config, ConflictPolicy};
pub use downloader::{Fetcher, YtDlpFetcher};
pub use error::AppError;
pub use progress::{FileReport, UrlOutcome};
