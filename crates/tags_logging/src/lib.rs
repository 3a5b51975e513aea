//! Logging setup for the tags binary.
//!
//! The level is decided once per invocation from the CLI flags and handed to
//! [`init_logging`] as a [`LogConfig`]; nothing reads or changes it afterwards.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Crates whose events are shown at the selected level.
const APP_CRATES: &[&str] = &["tags", "tags_core", "tags_logging"];

/// How much to log to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// `-q`: nothing
    Quiet,
    /// No flag: errors only, unless `RUST_LOG` says otherwise
    #[default]
    Normal,
    /// `-v`: progress
    Verbose,
    /// `-vv`: every rule candidate
    Debug,
}

impl Verbosity {
    /// Map `-q` and the number of `-v` flags.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Debug,
        }
    }

    fn level(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "off",
            Verbosity::Normal => "error",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }

    /// Filter directives for this verbosity.
    pub fn filter_directives(&self) -> String {
        if *self == Verbosity::Quiet {
            return "off".to_string();
        }
        let level = self.level();
        let mut directives = vec!["error".to_string()];
        directives.extend(APP_CRATES.iter().map(|name| format!("{name}={level}")));
        directives.join(",")
    }
}

/// Logging configuration for one process invocation.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbosity: Verbosity,
}

fn build_filter(verbosity: Verbosity) -> EnvFilter {
    let explicit = EnvFilter::new(verbosity.filter_directives());
    if verbosity != Verbosity::Normal {
        return explicit;
    }
    EnvFilter::try_from_default_env().unwrap_or(explicit)
}

/// Install the stderr subscriber.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let filter = build_filter(config.verbosity);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(config.verbosity == Verbosity::Debug)
                .with_filter(filter),
        )
        .try_init()
        .with_context(|| format!("Failed to initialize logging for {}", config.app_name))?;

    Ok(())
}
