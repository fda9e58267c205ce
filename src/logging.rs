// 📜 Logging - tracing subscriber setup
// Events go to stderr; the filter comes from CONECTAR_LOG or the config default.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `CONECTAR_LOG=conectar=debug`
pub const LOG_ENV: &str = "CONECTAR_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Logs go to stderr so they never interleave with menu output on stdout.
/// Falls back to `default_filter` when `CONECTAR_LOG` is unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
