use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs JSON logging on stderr. `RUST_LOG` overrides `log_level`.
/// Stdout is left to the report. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(service_name: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(service = service_name, "Tracing initialized");
    }
}
