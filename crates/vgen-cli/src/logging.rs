//! Tracing setup for the binary.

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "vgen=info";

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. Set
/// `LOG_FORMAT=json` for JSON lines; `RUST_LOG` adds directives.
pub fn init_tracing() {
    let env_filter = EnvFilter::from_default_env().add_directive(default_directive());

    if use_json() {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

fn use_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn default_directive() -> Directive {
    DEFAULT_DIRECTIVE
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}
