//! Add command - create tags or extend their rules

use crate::cli::error::HelpfulError;
use crate::cli::Context;
use tracing::info;

/// Arguments for `tags add`
#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// The tag to add the rule to
    pub tag: String,

    /// Rule type: file_exists, file_contains or in_path
    pub kind: String,

    /// Values to add (paths, or <FILE> <TEXT> pairs for file_contains).
    /// Taken verbatim, including a leading '-'; put flags before the values.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

pub fn run(ctx: &Context, args: AddArgs) -> anyhow::Result<()> {
    let mut set = ctx.load_or_default()?;

    info!(tag = %args.tag, kind = %args.kind, values = args.values.len(), "Adding rule values");
    set.add_rule(&args.tag, &args.kind, &args.values)
        .map_err(|e| HelpfulError::from_tags_error(e, &ctx.config_path))?;

    ctx.save(&set)
}
