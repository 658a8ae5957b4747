use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info";

pub fn init_logging() {
    init_logging_with(DEFAULT_DIRECTIVES);
}

/// Installs the global subscriber, preferring `RUST_LOG` over `default_directives`.
/// Returns false when a subscriber was already installed.
pub fn init_logging_with(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
