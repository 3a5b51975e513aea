use super::{join_relative, RuleKind};
use crate::error::{Result, TagsError};
use memchr::memmem;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Matches when any listed file contains its paired substring.
///
/// The search is exact and case-sensitive over the raw file bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContains {
    search: BTreeMap<String, String>,
}

impl FileContains {
    pub fn new(search: BTreeMap<String, String>) -> Self {
        Self { search }
    }

    pub fn search(&self) -> &BTreeMap<String, String> {
        &self.search
    }

    pub(crate) fn from_config(fragment: &Map<String, Value>) -> Result<Self> {
        let kind = RuleKind::FileContains;
        let key = kind.config_key();
        let value = fragment.get(key).ok_or_else(|| {
            TagsError::config(format!(
                "[{kind}] missing \"{key}\" in config (legacy {{\"<file>\": \"<text>\"}} form is not supported)"
            ))
        })?;
        let object = value
            .as_object()
            .ok_or_else(|| TagsError::config(format!("[{kind}] \"{key}\" is not an object: {value}")))?;

        let mut search = BTreeMap::new();
        for (file, text) in object {
            let text = text.as_str().ok_or_else(|| {
                TagsError::config(format!("[{kind}] invalid value for file \"{file}\": {text}"))
            })?;
            search.insert(file.clone(), text.to_string());
        }

        Ok(Self { search })
    }

    pub fn evaluate(&self, dir: &Path) -> Result<bool> {
        for (file, text) in &self.search {
            debug!(file = %file, text = %text, "file_contains");

            let candidate = join_relative(dir, file);
            let contents = match fs::read(&candidate) {
                Ok(contents) => contents,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(TagsError::io(candidate, e)),
            };

            if memmem::find(&contents, text.as_bytes()).is_some() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Insert `<FILE> <TEXT>` pairs, replacing any previous text for a file.
    pub fn add(&mut self, values: &[String]) -> Result<()> {
        if values.is_empty() {
            return Err(TagsError::argument("No mappings provided for file_contains"));
        }
        check_pairs(values)?;

        for pair in values.chunks_exact(2) {
            self.search.insert(pair[0].clone(), pair[1].clone());
        }
        Ok(())
    }

    /// Remove exact `<FILE> <TEXT>` pairs; empty `values` clears the rule.
    pub fn remove(&mut self, values: &[String]) -> Result<()> {
        if values.is_empty() {
            self.search.clear();
            return Ok(());
        }
        check_pairs(values)?;

        for pair in values.chunks_exact(2) {
            if self.search.get(&pair[0]) == Some(&pair[1]) {
                self.search.remove(&pair[0]);
            }
        }
        Ok(())
    }
}

fn check_pairs(values: &[String]) -> Result<()> {
    if values.len() % 2 != 0 {
        return Err(TagsError::argument(format!(
            "Odd number of arguments ({}): file_contains expects <FILE> <TEXT> pairs",
            values.len()
        )));
    }
    Ok(())
}
