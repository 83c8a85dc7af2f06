use crate::error::{AppError, Result};
use crate::options::DownloadConfig;
use crate::Config;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info, instrument};
use yt_dlp::fetcher::deps::Libraries;
use yt_dlp::Youtube;

/// yt-dlp exits with 1 when a download itself failed (unavailable video,
/// HTTP error, unsupported URL...).
const DOWNLOAD_ERROR_EXIT_CODE: i32 = 1;

/// Hands one URL to the program that actually downloads it.
///
/// `Ok(())` means the video was saved. A recoverable failure is reported as
/// [`AppError::DownloadFailed`]; any other error stops the batch.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, options: &DownloadConfig) -> Result<()>;
}

/// [`Fetcher`] that runs the yt-dlp executable.
///
/// # Fields
/// * `yt_dlp` - Path to the yt-dlp executable
/// * `ffmpeg` - Path to ffmpeg, used by yt-dlp to merge streams
pub struct YtDlpFetcher {
    yt_dlp: PathBuf,
    ffmpeg: PathBuf,
}

impl YtDlpFetcher {
    /// Prepares yt-dlp and ffmpeg in the configured libraries directory
    ///
    /// # Details
    /// Downloads both binaries when either is missing. Otherwise reuses them
    /// and, if `update_downloader` is set, lets yt-dlp update itself.
    ///
    /// # Errors
    /// * If the binaries cannot be fetched or updated
    #[instrument(skip(config))]
    pub async fn provision(config: &Config) -> Result<Self> {
        let yt_dlp = config.libraries_dir.join("yt-dlp");
        let ffmpeg = config.libraries_dir.join("ffmpeg");

        if !yt_dlp.exists() || !ffmpeg.exists() {
            info!("Fetching yt-dlp and ffmpeg into {}", config.libraries_dir.display());
            Youtube::with_new_binaries(config.libraries_dir.clone(), config.output_dir.clone())
                .await?;
        } else if config.update_downloader {
            let libraries = Libraries::new(yt_dlp.clone(), ffmpeg.clone());
            let youtube = Youtube::new(libraries, config.output_dir.clone())?;
            youtube.update_downloader().await?;
        }

        Ok(Self::with_binaries(yt_dlp, ffmpeg))
    }

    /// Uses already installed binaries as they are.
    pub fn with_binaries(yt_dlp: PathBuf, ffmpeg: PathBuf) -> Self {
        Self { yt_dlp, ffmpeg }
    }

    fn command(&self, url: &str, options: &DownloadConfig) -> Command {
        let mut command = Command::new(&self.yt_dlp);
        command
            .args(options.to_args())
            .arg("--ffmpeg-location")
            .arg(&self.ffmpeg)
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        command
    }
}

#[async_trait]
impl Fetcher for YtDlpFetcher {
    #[instrument(skip(self, options))]
    async fn fetch(&self, url: &str, options: &DownloadConfig) -> Result<()> {
        debug!("Running {} {:?}", self.yt_dlp.display(), options.to_args());
        let output = self
            .command(url, options)
            .output()
            .await
            .map_err(|e| {
                AppError::Collaborator(format!(
                    "could not run {}: {}",
                    self.yt_dlp.display(),
                    e
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        check_exit(url, output.status, &stderr)
    }
}

/// Maps a finished yt-dlp process to the batch's error model.
fn check_exit(url: &str, status: ExitStatus, stderr: &str) -> Result<()> {
    match status.code() {
        Some(0) => Ok(()),
        Some(DOWNLOAD_ERROR_EXIT_CODE) => Err(AppError::DownloadFailed {
            url: url.to_string(),
            reason: failure_reason(stderr),
        }),
        Some(code) => Err(AppError::Collaborator(format!(
            "yt-dlp exited with status {} for {}: {}",
            code,
            url,
            failure_reason(stderr)
        ))),
        None => Err(AppError::Collaborator(format!(
            "yt-dlp was terminated by a signal while fetching {}",
            url
        ))),
    }
}

/// Picks the line of yt-dlp's stderr that best explains a failure.
///
/// The last `ERROR:` line wins; without one, the last non-empty line is used.
fn failure_reason(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .iter()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|line| line.to_string())
        .unwrap_or_else(|| "no error output".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_prefers_last_error_line() {
        let stderr = "WARNING: slow\nERROR: first\nERROR: [vimeo] 12: private video\n\n";
        assert_eq!(failure_reason(stderr), "ERROR: [vimeo] 12: private video");
    }

    #[test]
    fn reason_falls_back_to_last_line() {
        assert_eq!(failure_reason("something\n  went wrong  \n"), "went wrong");
        assert_eq!(failure_reason(""), "no error output");
    }

    #[cfg(unix)]
    mod process {
        use super::super::*;
        use crate::platform::Platform;
        use std::path::Path;
        use std::os::unix::fs::PermissionsExt;
        use std::os::unix::process::ExitStatusExt;

        fn fake_yt_dlp(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn vimeo_options(dir: &Path) -> DownloadConfig {
            DownloadConfig::for_platform(Platform::Vimeo, dir).unwrap()
        }

        #[test]
        fn exit_codes_map_to_outcomes() {
            let ok = ExitStatus::from_raw(0);
            let download_error = ExitStatus::from_raw(1 << 8);
            let usage_error = ExitStatus::from_raw(2 << 8);
            let killed = ExitStatus::from_raw(9);

            assert!(check_exit("u", ok, "").is_ok());
            assert!(matches!(
                check_exit("u", download_error, "ERROR: gone"),
                Err(AppError::DownloadFailed { reason, .. }) if reason == "ERROR: gone"
            ));
            assert!(matches!(
                check_exit("u", usage_error, "bad option"),
                Err(AppError::Collaborator(_))
            ));
            assert!(matches!(
                check_exit("u", killed, ""),
                Err(AppError::Collaborator(_))
            ));
        }

        #[tokio::test]
        async fn passes_url_and_options_to_executable() {
            let tmp = tempfile::tempdir().unwrap();
            let args_file = tmp.path().join("args");
            let script = fake_yt_dlp(
                tmp.path(),
                "yt-dlp",
                &format!("printf '%s\\n' \"$@\" > '{}'", args_file.display()),
            );
            let fetcher = YtDlpFetcher::with_binaries(script, tmp.path().join("ffmpeg"));

            fetcher
                .fetch("https://vimeo.com/1", &vimeo_options(tmp.path()))
                .await
                .unwrap();

            let args = std::fs::read_to_string(&args_file).unwrap();
            let args: Vec<&str> = args.lines().collect();
            assert_eq!(args[0], "-f");
            assert_eq!(args[1], "best");
            assert_eq!(args[2], "-o");
            assert!(args.contains(&"--ffmpeg-location"));
            assert_eq!(args[args.len() - 2], "--");
            assert_eq!(args[args.len() - 1], "https://vimeo.com/1");
        }

        #[tokio::test]
        async fn exit_status_one_is_a_download_failure() {
            let tmp = tempfile::tempdir().unwrap();
            let script = fake_yt_dlp(
                tmp.path(),
                "yt-dlp",
                "echo 'ERROR: [vimeo] 1: This video is private' >&2\nexit 1",
            );
            let fetcher = YtDlpFetcher::with_binaries(script, tmp.path().join("ffmpeg"));

            let err = fetcher
                .fetch("https://vimeo.com/1", &vimeo_options(tmp.path()))
                .await
                .unwrap_err();
            match err {
                AppError::DownloadFailed { url, reason } => {
                    assert_eq!(url, "https://vimeo.com/1");
                    assert_eq!(reason, "ERROR: [vimeo] 1: This video is private");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn missing_executable_is_fatal() {
            let tmp = tempfile::tempdir().unwrap();
            let fetcher = YtDlpFetcher::with_binaries(
                tmp.path().join("missing"),
                tmp.path().join("ffmpeg"),
            );
            let err = fetcher
                .fetch("https://vimeo.com/1", &vimeo_options(tmp.path()))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Collaborator(_)));
        }
    }
}
