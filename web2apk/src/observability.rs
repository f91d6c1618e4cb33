//! Logging setup
//!
//! A [`Logging`] handle is built once at process start and the command runs
//! inside [`Logging::in_scope`]. The subscriber is scoped to that call rather
//! than installed globally, so library code only ever sees the dispatcher the
//! caller chose.
//!
//! # Example
//!
//! ```rust
//! use web2apk::observability::{LogFormat, Logging};
//!
//! let logging = Logging::new(false, LogFormat::Compact);
//! logging.in_scope(|| {
//!     tracing::info!("generating wrapper");
//! });
//! ```

use serde::{Deserialize, Serialize};
use tracing::Dispatch;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Output format for diagnostic logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output (default)
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Logging handle owning the process subscriber
#[derive(Clone)]
pub struct Logging {
    dispatch: Dispatch,
}

impl std::fmt::Debug for Logging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logging").finish_non_exhaustive()
    }
}

impl Logging {
    /// Build the logging handle
    ///
    /// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug`
    /// over `info`. Logs are written to stderr so command output on stdout
    /// stays clean.
    #[must_use]
    pub fn new(verbose: bool, format: LogFormat) -> Self {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let registry = tracing_subscriber::registry().with(env_filter);
        let dispatch = match format {
            LogFormat::Pretty => Dispatch::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                ),
            ),
            LogFormat::Compact => Dispatch::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                ),
            ),
            LogFormat::Json => Dispatch::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                ),
            ),
        };

        Self { dispatch }
    }

    /// Run `f` with this handle's subscriber as the active dispatcher
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
