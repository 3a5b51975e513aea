//! Find command - print the tags matching a directory
//!
//! This is the default command: `tags ~/src/project` is `tags find ~/src/project`.

use crate::cli::error::HelpfulError;
use crate::cli::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tags_core::paths::absolutize;
use tags_core::{EvalMode, MatchEngine, MatchOptions, MatchReport, PrefixMode};
use tracing::{info, warn};

/// Arguments for `tags find`
#[derive(Debug, Default, clap::Args)]
pub struct FindArgs {
    /// Directory to find tags for (default: current directory)
    pub directory: Option<PathBuf>,

    /// Match in_path prefixes on whole path components only
    #[arg(long)]
    pub segment_prefix: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FindArgs {
    /// Combine the args given after `find` with any given before it.
    ///
    /// `tags --segment-prefix find DIR` keeps the flag; a directory given on
    /// both sides is rejected.
    pub fn merge(self, outer: FindArgs) -> anyhow::Result<FindArgs> {
        let directory = match (self.directory, outer.directory) {
            (Some(after), Some(before)) => {
                return Err(HelpfulError::new("Directory given twice")
                    .with_context(format!("{} and {}", before.display(), after.display()))
                    .with_suggestion("TRY: tags find <DIRECTORY>")
                    .into())
            }
            (after, before) => after.or(before),
        };

        Ok(FindArgs {
            directory,
            segment_prefix: self.segment_prefix || outer.segment_prefix,
            json: self.json || outer.json,
        })
    }
}

#[derive(Debug, Serialize)]
struct FindOutput<'a> {
    directory: String,
    tags: Vec<&'a str>,
    errors: Vec<FindError<'a>>,
}

#[derive(Debug, Serialize)]
struct FindError<'a> {
    tag: &'a str,
    error: String,
}

pub fn run(ctx: &Context, args: FindArgs) -> anyhow::Result<()> {
    let set = ctx.load()?;
    let dir = resolve_directory(args.directory.as_deref())?;
    info!(dir = %dir.display(), "Directory");

    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Not an existing directory; only in_path rules can match");
    }

    let options = MatchOptions {
        prefix_mode: if args.segment_prefix {
            PrefixMode::Segment
        } else {
            PrefixMode::String
        },
    };
    let mode = if ctx.parallel {
        EvalMode::Parallel
    } else {
        EvalMode::Sequential
    };

    let report = MatchEngine::new(options)
        .evaluate(&set, &dir, mode)
        .map_err(|e| HelpfulError::from_tags_error(e, &ctx.config_path))?;

    if args.json {
        print_json(&dir, &report)?;
    } else {
        for name in report.matched() {
            println!("{}", name);
        }
    }

    Ok(())
}

fn resolve_directory(directory: Option<&Path>) -> anyhow::Result<PathBuf> {
    match directory {
        Some(dir) => Ok(absolutize(dir)?),
        None => std::env::current_dir().map_err(|e| {
            HelpfulError::new("Cannot determine the current directory")
                .with_context(e.to_string())
                .with_suggestion("TRY: Pass the directory explicitly: tags find <DIRECTORY>")
                .into()
        }),
    }
}

fn print_json(dir: &Path, report: &MatchReport) -> anyhow::Result<()> {
    let output = FindOutput {
        directory: dir.to_string_lossy().into_owned(),
        tags: report.matched().collect(),
        errors: report
            .failures()
            .map(|(tag, err)| FindError {
                tag,
                error: err.to_string(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
