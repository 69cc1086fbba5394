//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters events by `RUST_LOG`, else `config.trace_level`, else `"info"`
/// 2. Formats them with `tracing-subscriber`'s fmt layer
/// 3. Writes them to the rotating `trace_file` if one is configured, otherwise
///    to stderr
///
/// # Initialization Behavior
///
/// - Creates the trace file's parent directory if needed
/// - Falls back to stderr if that directory cannot be created
/// - Idempotent: safe to call multiple times (only the first call takes effect)
///
/// # Example
///
/// ```rust
/// use survey_lens::observability::init_tracing;
/// use survey_lens::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let file_writer = config.trace_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if std::fs::create_dir_all(parent).is_err() {
                return None;
            }
        }
        Some(FileWriter::new(path.clone()))
    });

    let stderr_layer = file_writer
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr));
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(move || writer.clone())
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);

    let _ = subscriber.try_init();
}
