//! Tracing subscriber setup shared by the binaries.
//!
//! `RUST_LOG` always wins over the level passed in; otherwise the given level
//! applies to the returnlab crates and `warn` to everything else.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the requested level.
const OWN_TARGETS: &[&str] = &[
    "returnlab_core",
    "returnlab_runner",
    "returnlab_tui",
    "returnlab",
];

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(directives(level))
}

fn directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Log to stderr in the given format.
pub fn init_logging(level: &str, format: LogFormat) {
    let subscriber = tracing_subscriber::registry().with(build_filter(level));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true);
            let _ = subscriber.with(layer).try_init();
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false);
            let _ = subscriber.with(layer).try_init();
        }
    }

    tracing::debug!(level, ?format, "logging initialized");
}

/// Log to a file, leaving the terminal to a full-screen UI.
pub fn init_file_logging(level: &str, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(layer)
        .try_init();

    tracing::debug!(level, path = %path.display(), "file logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn directives_quiet_other_crates() {
        let d = directives("debug");
        assert!(d.starts_with("warn,"));
        assert!(d.contains("returnlab_runner=debug"));
        assert!(d.contains("returnlab_core=debug"));
    }
}
