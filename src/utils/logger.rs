use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "trendspec=debug,info"
    } else {
        "trendspec=info"
    }
}

/// `RUST_LOG` wins over the defaults.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Compact human-readable lines on stdout.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for piping runs into log tooling.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_crate_level_to_debug() {
        assert_eq!(default_directives(true), "trendspec=debug,info");
        assert_eq!(default_directives(false), "trendspec=info");
        assert!(default_directives(true).parse::<EnvFilter>().is_ok());
    }
}
