//! Rule variants
//!
//! The closed set of directory predicates a tag can hold. Each variant owns
//! its parameters and knows how to evaluate, mutate and (de)serialize them;
//! [`Rule`] dispatches over the variants by pattern matching.

mod file_contains;
mod file_exists;
mod in_path;

pub use file_contains::FileContains;
pub use file_exists::FileExists;
pub use in_path::InPath;

use crate::error::{Result, TagsError};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rule kind, as named in the config file and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    FileExists,
    FileContains,
    InPath,
}

impl RuleKind {
    /// Every kind, in canonical order.
    pub const ALL: [RuleKind; 3] = [RuleKind::FileExists, RuleKind::FileContains, RuleKind::InPath];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::FileExists => "file_exists",
            RuleKind::FileContains => "file_contains",
            RuleKind::InPath => "in_path",
        }
    }

    /// Key holding the parameters inside this kind's config fragment.
    pub fn config_key(&self) -> &'static str {
        match self {
            RuleKind::FileExists => "files",
            RuleKind::FileContains => "search",
            RuleKind::InPath => "paths",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = TagsError;

    fn from_str(s: &str) -> Result<Self> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TagsError::UnknownRuleKind(s.to_string()))
    }
}

/// How `in_path` prefixes are compared against the target directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixMode {
    /// Plain string prefix: `/usr/share/fontsX` matches `/usr/share/fonts`.
    #[default]
    String,
    /// Whole path components only.
    Segment,
}

/// Options shared by every rule evaluation in one match run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub prefix_mode: PrefixMode,
}

/// One configured rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    FileExists(FileExists),
    FileContains(FileContains),
    InPath(InPath),
}

impl Rule {
    /// Create a rule of `kind` with no parameters.
    pub fn empty(kind: RuleKind) -> Self {
        match kind {
            RuleKind::FileExists => Rule::FileExists(FileExists::default()),
            RuleKind::FileContains => Rule::FileContains(FileContains::default()),
            RuleKind::InPath => Rule::InPath(InPath::default()),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::FileExists(_) => RuleKind::FileExists,
            Rule::FileContains(_) => RuleKind::FileContains,
            Rule::InPath(_) => RuleKind::InPath,
        }
    }

    /// Test `dir` against this rule.
    ///
    /// Missing candidate files are a non-match; any other IO failure is an error.
    pub fn evaluate(&self, dir: &Path, options: &MatchOptions) -> Result<bool> {
        match self {
            Rule::FileExists(rule) => rule.evaluate(dir),
            Rule::FileContains(rule) => rule.evaluate(dir),
            Rule::InPath(rule) => rule.evaluate(dir, options.prefix_mode),
        }
    }

    pub fn add(&mut self, values: &[String]) -> Result<()> {
        match self {
            Rule::FileExists(rule) => rule.add(values),
            Rule::FileContains(rule) => rule.add(values),
            Rule::InPath(rule) => rule.add(values),
        }
    }

    /// Remove parameters. An empty `values` clears the rule.
    pub fn remove(&mut self, values: &[String]) -> Result<()> {
        match self {
            Rule::FileExists(rule) => rule.remove(values),
            Rule::FileContains(rule) => rule.remove(values),
            Rule::InPath(rule) => rule.remove(values),
        }
    }

    /// True when the rule has no parameters (and can never match).
    pub fn is_empty(&self) -> bool {
        match self {
            Rule::FileExists(rule) => rule.files().is_empty(),
            Rule::FileContains(rule) => rule.search().is_empty(),
            Rule::InPath(rule) => rule.paths().is_empty(),
        }
    }

    /// Build a rule from its config fragment, e.g. `{"files": ["Makefile"]}`.
    pub fn from_config(kind: RuleKind, fragment: &Value) -> Result<Self> {
        let object = fragment.as_object().ok_or_else(|| {
            TagsError::config(format!(
                "[{kind}] expected an object with a \"{key}\" key, found {fragment} (legacy bare-value format is not supported)",
                key = kind.config_key(),
            ))
        })?;

        match kind {
            RuleKind::FileExists => FileExists::from_config(object).map(Rule::FileExists),
            RuleKind::FileContains => FileContains::from_config(object).map(Rule::FileContains),
            RuleKind::InPath => InPath::from_config(object).map(Rule::InPath),
        }
    }

    pub fn to_config(&self) -> Value {
        let mut fragment = Map::new();
        let kind = self.kind();
        let params = match self {
            Rule::FileExists(rule) => string_list_value(rule.files()),
            Rule::FileContains(rule) => Value::Object(
                rule.search()
                    .iter()
                    .map(|(file, text)| (file.clone(), Value::String(text.clone())))
                    .collect(),
            ),
            Rule::InPath(rule) => string_list_value(rule.paths()),
        };
        fragment.insert(kind.config_key().to_string(), params);
        Value::Object(fragment)
    }

    /// Display lines, one per parameter, each prefixed with the kind name.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Rule::FileExists(rule) => rule
                .files()
                .iter()
                .map(|file| format!("file_exists: {file}"))
                .collect(),
            Rule::FileContains(rule) => rule
                .search()
                .iter()
                .map(|(file, text)| format!("file_contains: {file} >> {text}"))
                .collect(),
            Rule::InPath(rule) => rule
                .paths()
                .iter()
                .map(|path| format!("in_path: {path}"))
                .collect(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_lines().join("\n"))
    }
}

/// Join a configured relative path under `dir`. Leading separators are
/// stripped so an entry like `/Makefile` still stays inside `dir`.
pub(crate) fn join_relative(dir: &Path, rel: &str) -> PathBuf {
    dir.join(rel.trim_start_matches(['/', '\\']))
}

fn string_list_value(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Read a `{"<key>": ["a", "b"]}` fragment.
pub(crate) fn string_list_from_config(
    kind: RuleKind,
    fragment: &Map<String, Value>,
) -> Result<Vec<String>> {
    let key = kind.config_key();
    let value = fragment
        .get(key)
        .ok_or_else(|| TagsError::config(format!("[{kind}] missing \"{key}\" in config")))?;
    let list = value
        .as_array()
        .ok_or_else(|| TagsError::config(format!("[{kind}] \"{key}\" is not a list: {value}")))?;

    list.iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| TagsError::config(format!("[{kind}] invalid entry in \"{key}\": {item}")))
        })
        .collect()
}

/// Append list entries (`file_exists`, `in_path`).
pub(crate) fn add_list_entries(kind: RuleKind, list: &mut Vec<String>, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(TagsError::argument(format!(
            "No {} specified for {kind}",
            kind.config_key()
        )));
    }
    list.extend(values.iter().cloned());
    Ok(())
}

/// Remove every entry equal to one of `values`; empty `values` clears the list.
pub(crate) fn remove_list_entries(list: &mut Vec<String>, values: &[String]) {
    if values.is_empty() {
        list.clear();
        return;
    }
    list.retain(|entry| !values.contains(entry));
}
