use std::fmt;

/// Video host recognized from a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Vimeo,
    Unknown,
}

const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];
const VIMEO_HOSTS: [&str; 1] = ["vimeo.com"];

/// Classifies a URL by plain, case-sensitive substring matching.
///
/// The text is not parsed or normalized, so `https://YouTube.com/...` is
/// `Unknown`. YouTube wins when both hosts appear.
///
/// # Examples
///
/// ```
/// use ytbatch::platform::{classify, Platform};
///
/// assert_eq!(classify("https://youtu.be/dQw4w9WgXcQ"), Platform::YouTube);
/// assert_eq!(classify("https://vimeo.com/76979871"), Platform::Vimeo);
/// assert_eq!(classify("https://example.com/clip.mp4"), Platform::Unknown);
/// ```
pub fn classify(url: &str) -> Platform {
    if YOUTUBE_HOSTS.iter().any(|host| url.contains(host)) {
        Platform::YouTube
    } else if VIMEO_HOSTS.iter().any(|host| url.contains(host)) {
        Platform::Vimeo
    } else {
        Platform::Unknown
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::YouTube => "youtube",
            Platform::Vimeo => "vimeo",
            Platform::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
