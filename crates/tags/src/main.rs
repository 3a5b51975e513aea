//! tags - use rules to tag directories
//!
//! `tags [DIRECTORY]` prints every configured tag whose rules match the
//! directory. `show`, `add` and `rm` manage the rules file.

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tags_core::paths::{default_config_path, expand_tilde};
use tags_logging::{init_logging, LogConfig, Verbosity};
use tracing::debug;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "tags",
    version,
    about = "Use rules to tag directories",
    disable_help_subcommand = true
)]
struct Cli {
    /// Path to the rules file [default: $TAGS_CONFIG or <config dir>/tags/rules.json]
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Evaluate tag rules in parallel
    #[arg(short = 'p', long, global = true)]
    parallel: bool,

    /// Suppress all log output
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose output (-vv for debugging output)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Arguments for the default `find` command
    #[command(flatten)]
    find: cli::find::FindArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// (Default) Print the tags for the given or current directory
    Find(cli::find::FindArgs),

    /// Show all tags and their rules
    Show(cli::show::ShowArgs),

    /// Add a rule or rule values to a tag, creating the tag if needed
    Add(cli::add::AddArgs),

    /// Remove a tag, a rule, or rule values
    Rm(cli::rm::RmArgs),

    /// Show help for a command or a help page (rules, config)
    Help(cli::help::HelpArgs),
}

fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    match flag {
        Some(path) => match path.to_str().map(expand_tilde) {
            Some(Ok(expanded)) => PathBuf::from(expanded),
            _ => path,
        },
        None => default_config_path(),
    }
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    let ctx = cli::Context {
        config_path: resolve_config_path(cli.config),
        parallel: cli.parallel,
    };

    match cli.command {
        Some(Commands::Find(args)) => cli::find::run(&ctx, args.merge(cli.find)?),
        None => cli::find::run(&ctx, cli.find),
        Some(Commands::Show(args)) => cli::show::run(&ctx, args),
        Some(Commands::Add(args)) => cli::add::run(&ctx, args),
        Some(Commands::Rm(args)) => cli::rm::run(&ctx, args),
        Some(Commands::Help(args)) => cli::help::run(args, Cli::command(), &ctx.config_path),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    if let Err(err) = init_logging(LogConfig {
        app_name: "tags",
        verbosity,
    }) {
        eprintln!("Warning: {:#}", err);
    }
    debug!(command = ?cli.command, "Running command");

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if verbosity != Verbosity::Quiet {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
