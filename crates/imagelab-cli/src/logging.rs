//! Logging initialization.
//!
//! Events from the Image Lab crates are shown at INFO (DEBUG with
//! `--verbose`); dependencies only surface warnings. Output is human-readable
//! by default and JSON with `--json-logs`. Everything goes to stderr so that
//! stdout stays reserved for the written paths and listings.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate targets whose events follow the `--verbose` switch.
const OWN_TARGETS: [&str; 2] = ["imagelab", "imagelab_core"];

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Install the global subscriber. `RUST_LOG` overrides the default directives.
pub fn init(verbose: bool, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let json = json_format.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let pretty = (!json_format).then(|| {
        fmt::layer()
            .with_target(verbose)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(false),
            "warn,imagelab=info,imagelab_core=info"
        );
        assert_eq!(
            default_directives(true),
            "warn,imagelab=debug,imagelab_core=debug"
        );
    }

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
    }
}
