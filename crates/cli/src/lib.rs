pub mod cli;

use std::env;
use tracing::Level;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Installs the global subscriber once. Logs go to stderr so stdout stays
/// clean for the plan. `RUST_LOG` takes precedence over `level`, and
/// `PHASECALL_LOG_JSON` switches to JSON lines.
pub fn init_logging(level: Level) {
    use std::sync::Once;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            // prefix match, so this also covers the phasecall_* library crates
            if let Ok(directive) = format!("phasecall={}", level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        let registry = tracing_subscriber::registry().with(filter);
        if env::var("PHASECALL_LOG_JSON").is_ok() {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    });
}

pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        trace = { "trace", Level::TRACE },
        debug_upper = { "DEBUG", Level::DEBUG },
        warn = { "warn", Level::WARN },
        error = { "Error", Level::ERROR },
        unknown = { "loud", Level::INFO },
    )]
    fn test_parse_level(input: &str, expected: Level) {
        assert_eq!(parse_level(input), expected);
    }
}
