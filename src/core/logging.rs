//! Diagnostic logging
//!
//! User-facing progress stays on `INFO:` lines; `tracing` output is for
//! debugging and goes to stderr. `RUST_LOG` wins over `--verbose`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
  if verbose { "plugin_release=debug" } else { "warn" }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr),
    )
    .try_init();
}
