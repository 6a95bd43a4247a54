use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and `--verbose` is off.
const DEFAULT_FILTER: &str = "warn";

/// Filter used with `--verbose`: debug for this crate, warnings elsewhere.
const VERBOSE_FILTER: &str = "warn,llava_cli=debug";

/// Build the log filter for the given verbosity.
///
/// `--verbose` wins over `RUST_LOG`; otherwise `RUST_LOG` is honored.
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Logs go to standard error so standard
/// output carries only the model's reply.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        let rendered = filter(true).to_string();
        assert!(rendered.contains("llava_cli=debug"));
    }
}
