pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "quick_tally=warn";

/// Filter from `RUST_LOG` when it is set and valid, else warnings only.
fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber. Shell output goes to stdout, so
/// logs go to stderr and default to warnings only; raise with `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter(rust_log.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn defaults_to_warnings() {
        assert_eq!(build_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn rust_log_can_raise_the_level() {
        let filter = build_filter(Some("quick_tally=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            build_filter(Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn invalid_rust_log_falls_back() {
        let filter = build_filter(Some("quick_tally=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
