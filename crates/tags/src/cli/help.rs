//! Help command - command help plus the `rules` and `config` pages

use std::path::Path;
use tags_core::paths::CONFIG_ENV_VAR;

/// Arguments for `tags help`
#[derive(Debug, clap::Args)]
pub struct HelpArgs {
    /// A command (find, show, add, rm) or a page (rules, config)
    pub topic: Option<String>,
}

const COMMAND_TOPICS: &[&str] = &["find", "show", "add", "rm"];

pub fn run(args: HelpArgs, mut cmd: clap::Command, config_path: &Path) -> anyhow::Result<()> {
    match args.topic.as_deref() {
        Some(topic) if COMMAND_TOPICS.contains(&topic) => {
            let name = cmd.get_name().to_string();
            // `--help` on the subcommand renders its usage with the binary name.
            if let Err(err) = cmd.try_get_matches_from_mut([name.as_str(), topic, "--help"]) {
                err.print()?;
            }
        }
        Some("rules") => print!("{}", rules_page()),
        Some("config") => print!("{}", config_page(config_path)),
        _ => {
            cmd.print_help()?;
            println!();
            print!("{}", pages_footer());
        }
    }
    Ok(())
}

fn pages_footer() -> &'static str {
    "HELP PAGES

  tags help <COMMAND>   Help about find, show, add or rm
  tags help rules       The rule types and how they match
  tags help config      The rules file
"
}

fn rules_page() -> &'static str {
    r#"RULE TYPES

A tag matches a directory when any one of its rules matches. Each tag holds
at most one rule of each type; adding to an existing type extends it.

file_exists
  Matches when a path exists under the directory. The path is relative to
  the directory, may be nested, and may name a file or a directory.

  tags add make file_exists Makefile
  tags rm make file_exists Makefile

  Stored as:  "file_exists": { "files": ["Makefile"] }

file_contains
  Matches when a file under the directory contains a substring. The search
  covers the whole file and is case-sensitive. Values come in pairs.

  tags add react file_contains package.json react
  tags rm react file_contains package.json react

  Stored as:  "file_contains": { "search": { "package.json": "react" } }

in_path
  Matches when the directory lies under a path. A leading "~" is expanded
  to your home directory. The comparison is a plain string prefix, so
  /usr/share/fonts also matches /usr/share/fontsX; pass --segment-prefix
  to `tags find` to compare whole path components instead.

  tags add fonts in_path /usr/share/fonts
  tags rm fonts in_path /usr/share/fonts

  Stored as:  "in_path": { "paths": ["/usr/share/fonts"] }

REMOVING

  tags rm <TAG>                     Remove the whole tag
  tags rm <TAG> <TYPE>              Clear every value of a rule type
  tags rm <TAG> <TYPE> <VALUES>...  Remove specific values
"#
}

fn config_page(config_path: &Path) -> String {
    format!(
        r#"THE RULES FILE

  Current: {path}

  Tags and their rules live in a single JSON object:

    {{
      "<tag>": {{
        "<rule type>": {{ <rule type config> }}
      }}
    }}

  Each tag maps rule types to their config; see "tags help rules" for the
  shape of each. Tags left without any rule values are dropped when the
  file is rewritten by `tags add` or `tags rm`.

CHOOSING A FILE

  1. -c <PATH>
  2. the {env} environment variable ("~" is expanded)
  3. <config dir>/tags/rules.json

    tags -c ~/backup-rules.json show
    {env}=~/backup-rules.json tags
"#,
        path = config_path.display(),
        env = CONFIG_ENV_VAR,
    )
}
