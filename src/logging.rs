//! One-shot `tracing` subscriber setup for binaries and tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a compact formatter filtered by `level`, `RUST_LOG` or `info`, in that order.
///
/// Later calls and calls after another subscriber was installed are no-ops.
pub fn init_with_level(level: Option<&str>) {
    INIT.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }

        let wanted = directive(level, std::env::var("RUST_LOG").ok());

        let filter = tracing_subscriber::EnvFilter::try_new(&wanted).unwrap_or_else(|err| {
            eprintln!("WARN: invalid log filter '{wanted}': {err}; falling back to 'info'");
            tracing_subscriber::EnvFilter::new("info")
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    });
}

fn directive(level: Option<&str>, rust_log: Option<String>) -> String {
    match level {
        Some(level) if !level.is_empty() => level.to_string(),
        _ => rust_log.unwrap_or_else(|| "info".to_string()),
    }
}
