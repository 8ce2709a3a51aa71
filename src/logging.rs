//! Tracing setup
//!
//! Events go to stderr so command output on stdout stays clean. The filter
//! comes from `BEANS_LOG` when set, otherwise from the caller's default
//! directive (normally the `log_filter` setting).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "BEANS_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(default_directive))
            .unwrap_or_else(|_| EnvFilter::new("beans=warn"));

        // Another subscriber may already be installed (for example by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
