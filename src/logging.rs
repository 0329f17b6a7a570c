//! Tracing subscriber setup shared by the server and CLI binaries.

use std::env;
use std::sync::OnceLock;

use crate::config::LoggingConfig;

static TRACE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the global subscriber.
///
/// `VISITORS_LOG` overrides `logging.level` and `VISITORS_LOG_JSON` overrides
/// `logging.format`. Output goes to `logging.file` when set, stderr otherwise.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let level = env::var("VISITORS_LOG").unwrap_or_else(|_| config.level.clone());
    let json = env::var("VISITORS_LOG_JSON")
        .ok()
        .map_or_else(|| config.format == "json", |v| v != "0");

    let filter = tracing_subscriber::EnvFilter::try_new(&level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let writer = match &config.file {
        Some(path) => {
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("ERROR: Unable to open log file '{}': {e}", path.display());
                    return;
                }
            };
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    let (non_blocking, guard) = writer;
    let _ = TRACE_GUARD.set(guard);

    let base = || {
        tracing_subscriber::fmt()
            .with_env_filter(filter.clone())
            .with_ansi(config.file.is_none())
            .with_writer(non_blocking.clone())
    };

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if json {
        Box::new(base().json().finish())
    } else {
        Box::new(base().compact().finish())
    };

    let _ = tracing::subscriber::set_global_default(subscriber);
}
