//! Rm command - remove a tag, a rule, or rule values

use crate::cli::error::HelpfulError;
use crate::cli::Context;
use tracing::info;

/// Arguments for `tags rm`
#[derive(Debug, clap::Args)]
pub struct RmArgs {
    /// The tag to remove, or to remove rules from
    pub tag: String,

    /// Rule type to remove from. Omit to remove the entire tag.
    pub kind: Option<String>,

    /// Values to remove. Omit to clear every value of the rule type.
    /// Taken verbatim, including a leading '-'; put flags before the values.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

pub fn run(ctx: &Context, args: RmArgs) -> anyhow::Result<()> {
    let mut set = ctx.load()?;

    let result = match &args.kind {
        None => {
            info!(tag = %args.tag, "Removing tag");
            set.remove_tag(&args.tag).map(|_| ())
        }
        Some(kind) => {
            // No values clears the rule but keeps it registered.
            info!(tag = %args.tag, kind = %kind, values = args.values.len(), "Removing rule values");
            set.remove_rule(&args.tag, kind, &args.values)
        }
    };
    result.map_err(|e| HelpfulError::from_tags_error(e, &ctx.config_path))?;

    ctx.save(&set)
}
