//! Logging setup for the binary.
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber. Sync outcomes are logged at `info`, so that is the
/// floor; `verbose` adds request-level `debug` traces. A set `RUST_LOG` takes over
/// filtering entirely.
///
/// Logs go to stderr so `cnbsync fetch` can pipe the raw feed from stdout.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (crate_filter, env_filter) = filters(verbose, rust_log.as_deref());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(crate_filter)
        .with(env_filter)
        .init();
}

/// The crate-level `Targets` filter only applies when `RUST_LOG` is absent; stacked
/// with a user directive it would cap what the directive asks for.
fn filters(verbose: bool, rust_log: Option<&str>) -> (Option<Targets>, EnvFilter) {
    let (crate_level, default_directive) = if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::INFO, "warn,cnbsync=info")
    };

    match rust_log.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        Some(env_filter) => (None, env_filter),
        None => {
            let crate_filter = Targets::new()
                .with_target("cnbsync", crate_level)
                .with_default(LevelFilter::WARN);
            (Some(crate_filter), EnvFilter::new(default_directive))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_rust_log_replaces_crate_filter() {
        let (crate_filter, env_filter) = filters(false, Some("cnbsync=debug"));
        assert!(crate_filter.is_none());
        assert_eq!(env_filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_default_filters_without_rust_log() {
        let (crate_filter, _) = filters(false, None);
        let crate_filter = crate_filter.unwrap();
        assert!(crate_filter.would_enable("cnbsync::sync", &Level::INFO));
        assert!(!crate_filter.would_enable("cnbsync::sync", &Level::DEBUG));
        assert!(!crate_filter.would_enable("hyper", &Level::INFO));

        let (verbose_filter, _) = filters(true, None);
        assert!(verbose_filter.unwrap().would_enable("cnbsync::feed", &Level::DEBUG));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_defaults() {
        let (crate_filter, env_filter) = filters(false, Some("cnbsync=notalevel"));
        assert!(crate_filter.is_some());
        assert_eq!(env_filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
