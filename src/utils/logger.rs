use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEBUG_TARGETS: [&str; 2] = ["pass_convert=debug", "convert=debug"];

/// Builds the CLI filter from `env` (normally `RUST_LOG`). With `debug` set,
/// this crate and the binary always log at debug level whatever `env` says.
pub fn cli_filter(debug: bool, env: Option<&str>) -> EnvFilter {
    let default = if debug {
        "pass_convert=debug,convert=debug,warn"
    } else {
        "pass_convert=info,convert=info,warn"
    };

    let mut filter = env
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    if debug {
        for target in DEBUG_TARGETS {
            if let Ok(directive) = target.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

pub fn init_cli_logger(debug: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(cli_filter(debug, env.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_overrides_env_level() {
        let filter = cli_filter(true, Some("info")).to_string();
        assert!(filter.contains("pass_convert=debug"));
        assert!(filter.contains("convert=debug"));
    }

    #[test]
    fn test_env_level_kept_without_debug() {
        let filter = cli_filter(false, Some("warn")).to_string();
        assert!(!filter.contains("pass_convert=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn test_default_filter_without_env() {
        let filter = cli_filter(false, None).to_string();
        assert!(filter.contains("pass_convert=info"));
    }
}
