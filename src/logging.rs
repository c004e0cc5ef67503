use tracing_subscriber::filter::EnvFilter;

pub const LOG_PATH_ENV: &str = "LANGUAGESAVER_LOG_PATH";

/// Initialize logging, writing to `LANGUAGESAVER_LOG_PATH` if set, otherwise
/// stderr. Stdout is left to the host for displayed pairs.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var(LOG_PATH_ENV) {
        if let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
