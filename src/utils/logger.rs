use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a global `tracing` subscriber.
///
/// The level is read from the `LOGLEVEL` environment variable (`error`, `warn`,
/// `info`, `debug`, `trace`) and defaults to `info`. Calling this more than once
/// is harmless: only the first call installs the subscriber.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = std::env::var("LOGLEVEL").unwrap_or_else(|_| "info".to_string());
        let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_names(true)
            .try_init();

        if result.is_ok() {
            tracing::debug!("Log level set to {}", level);
        }
    });
}
