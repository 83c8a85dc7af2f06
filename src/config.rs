use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What to do when the processed directory already holds a file with the
/// same name as the one being archived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file, like a plain `mv`.
    #[default]
    Overwrite,
    /// Stop the run and leave both files alone.
    Fail,
}

/// Configuration for the batch downloader.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
///
/// # Examples
///
/// ```
/// use ytbatch::Config;
///
/// let config = Config::default();
/// assert_eq!(config.output_dir, std::path::PathBuf::from("downloads"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub output_dir: PathBuf,
    pub libraries_dir: PathBuf,
    pub update_downloader: bool,
    pub on_conflict: ConflictPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            processed_dir: PathBuf::from("processed"),
            output_dir: PathBuf::from("downloads"),
            libraries_dir: PathBuf::from("libs"),
            update_downloader: true,
            on_conflict: ConflictPolicy::Overwrite,
        }
    }
}

impl Config {
    /// Parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Creates every directory the run reads from or writes to.
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.input_dir,
            &self.processed_dir,
            &self.output_dir,
            &self.libraries_dir,
        ] {
            tokio::fs::create_dir_all(dir).await?;
        }
        Ok(())
    }
}
