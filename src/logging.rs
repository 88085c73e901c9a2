//! Diagnostic logging.
//!
//! Diagnostics go to stderr through a `tracing` fmt subscriber. Verbose mode
//! (`logs.verbose`, `ATMOS_LOGS_VERBOSE`, `--logs-verbose`) shows `info`
//! events; otherwise only warnings and errors are shown. `RUST_LOG`, when
//! set, overrides both.
//!
//! Verbosity is only fully known once the CLI config is loaded, so the filter
//! is installed behind a reload handle and [`set_verbose`] adjusts it later.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let (filter, handle) = reload::Layer::new(build_filter(verbose));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Switch verbose diagnostics on or off.
pub fn set_verbose(verbose: bool) {
    if let Some(handle) = FILTER_HANDLE.get() {
        let _ = handle.reload(build_filter(verbose));
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}

pub(crate) fn default_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}
