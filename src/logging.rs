//! tracing subscriber setup.
//!
//! Filter precedence: `BACKOFFICE_LOG`, then `RUST_LOG`, then the level
//! implied by `-v` flags. Output goes to stderr so `--json` stdout stays clean.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "BACKOFFICE_LOG";

/// Default directive for a verbosity count. `interactive` silences the
/// default warnings so they do not draw over the full-screen browser.
pub fn default_directive(verbosity: u8, interactive: bool) -> &'static str {
    match verbosity {
        0 if interactive => "off",
        0 => "warn",
        1 => "backoffice=debug,warn",
        _ => "backoffice=trace,info",
    }
}

fn build_filter(verbosity: u8, interactive: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, interactive)))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8, interactive: bool) {
    let result = tracing_subscriber::registry()
        .with(build_filter(verbosity, interactive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
