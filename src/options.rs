use crate::platform::Platform;
use std::path::Path;

/// yt-dlp options chosen for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Format selector passed as `-f`.
    pub format: String,
    /// Output path template passed as `-o`.
    pub output_template: String,
    /// Container to merge separate streams into, if any.
    pub merge_output_format: Option<String>,
}

impl DownloadConfig {
    /// Picks the download options for a platform.
    ///
    /// Returns `None` for [`Platform::Unknown`]; such URLs are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use ytbatch::options::DownloadConfig;
    /// use ytbatch::platform::Platform;
    ///
    /// let cfg = DownloadConfig::for_platform(Platform::YouTube, Path::new("downloads")).unwrap();
    /// assert_eq!(cfg.format, "bestvideo+bestaudio/best");
    /// assert_eq!(cfg.merge_output_format.as_deref(), Some("mp4"));
    /// ```
    pub fn for_platform(platform: Platform, output_dir: &Path) -> Option<Self> {
        let output_template = output_dir
            .join("%(title)s.%(ext)s")
            .to_string_lossy()
            .into_owned();

        match platform {
            Platform::YouTube => Some(Self {
                format: "bestvideo+bestaudio/best".to_string(),
                output_template,
                merge_output_format: Some("mp4".to_string()),
            }),
            Platform::Vimeo => Some(Self {
                format: "best".to_string(),
                output_template,
                merge_output_format: None,
            }),
            Platform::Unknown => None,
        }
    }

    /// Renders the options as yt-dlp command line arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.clone(),
        ];
        if let Some(merge) = &self.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(merge.clone());
        }
        args
    }
}
