use crate::config::{Config, ConflictPolicy};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Download the YouTube and Vimeo URLs listed in text files"
)]
pub struct Cli {
    /// TOML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory scanned for .txt files of URLs
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the handled .txt files are moved to
    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    /// Directory videos are saved to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding the yt-dlp and ffmpeg binaries
    #[arg(long)]
    pub libraries_dir: Option<PathBuf>,

    /// Skip the yt-dlp self-update
    #[arg(long)]
    pub no_update: bool,

    /// What to do when the processed directory already has the file
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictArg {
    Overwrite,
    Fail,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
            ConflictArg::Fail => ConflictPolicy::Fail,
        }
    }
}

impl Cli {
    /// Builds the run configuration: defaults, then the config file, then
    /// flags given on the command line.
    pub fn resolve(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.processed_dir {
            config.processed_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(dir) = self.libraries_dir {
            config.libraries_dir = dir;
        }
        if self.no_update {
            config.update_downloader = false;
        }
        if let Some(policy) = self.on_conflict {
            config.on_conflict = policy.into();
        }

        Ok(config)
    }
}
