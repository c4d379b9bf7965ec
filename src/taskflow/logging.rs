//! Diagnostic logging for the binary.
//!
//! The library only emits `tracing` events; this module installs the subscriber.
//! Output goes to stderr so it never mixes with command output or CSV piped
//! from stdout. The filter comes from `TASKFLOW_LOG` (e.g. `taskflow=debug`),
//! falling back to `warn`, or `debug` when verbose.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TASKFLOW_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "taskflow=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "taskflow=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
    }
}
