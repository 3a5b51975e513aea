//! Show command - list every tag and its rules

use crate::cli::Context;
use tags_core::config::to_json_string;

/// Arguments for `tags show`
#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Print the canonical rules document instead
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: ShowArgs) -> anyhow::Result<()> {
    let set = ctx.load()?;

    if args.json {
        print!("{}", to_json_string(&set));
        return Ok(());
    }

    for tag in set.iter() {
        println!("[{}]", tag.name());

        let lines: Vec<String> = tag.rules().iter().flat_map(|rule| rule.display_lines()).collect();
        if !lines.is_empty() {
            for line in lines {
                println!("{}", line);
            }
            println!();
        }
    }

    Ok(())
}
