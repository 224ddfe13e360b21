//! Structured logging to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the log filter, e.g. `quickpreview=trace`.
pub const LOG_ENV: &str = "QUICKPREVIEW_LOG";

/// Install the global subscriber. Logs go to stderr alongside status lines.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter(verbose))
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "quickpreview=debug"
    } else {
        "quickpreview=warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(false), "quickpreview=warn");
        assert_eq!(default_directive(true), "quickpreview=debug");
    }
}
