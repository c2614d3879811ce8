//! Tracing initialisation for solkit binaries.
//!
//! Log lines always go to stderr; stdout is reserved for result JSON.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Variable consulted first for filter directives, before `RUST_LOG`.
pub const LOG_ENV: &str = "SOLKIT_LOG";

/// Install the global subscriber.
///
/// * `json`: newline-delimited JSON instead of the human format.
/// * `level`: default verbosity when neither `SOLKIT_LOG` nor `RUST_LOG` is set.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
            .try_init()
            .ok();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
