use tracing_subscriber::EnvFilter;

/// Installs the console subscriber.
///
/// Output goes to stderr so it does not interleave with yt-dlp's progress on
/// stdout. `RUST_LOG` overrides the default `info` level.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
