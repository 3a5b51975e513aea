use super::{add_list_entries, remove_list_entries, string_list_from_config, PrefixMode, RuleKind};
use crate::error::Result;
use crate::paths::{absolutize, expand_tilde};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Matches when the directory lies under any listed path prefix.
///
/// Entries are stored raw (`~/fonts`); tilde expansion and resolution to an
/// absolute path happen at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InPath {
    paths: Vec<String>,
}

impl InPath {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub(crate) fn from_config(fragment: &Map<String, Value>) -> Result<Self> {
        string_list_from_config(RuleKind::InPath, fragment).map(Self::new)
    }

    pub fn evaluate(&self, dir: &Path, mode: PrefixMode) -> Result<bool> {
        let target = dir.to_string_lossy();

        for path in &self.paths {
            debug!(path = %path, ?mode, "in_path");

            let expanded = expand_tilde(path)?;
            let prefix = absolutize(Path::new(&expanded))?;

            let matched = match mode {
                PrefixMode::String => target.starts_with(&*prefix.to_string_lossy()),
                PrefixMode::Segment => dir.starts_with(&prefix),
            };
            if matched {
                return Ok(true);
            }
        }

        Ok(false)
    }

    pub fn add(&mut self, values: &[String]) -> Result<()> {
        add_list_entries(RuleKind::InPath, &mut self.paths, values)
    }

    pub fn remove(&mut self, values: &[String]) -> Result<()> {
        remove_list_entries(&mut self.paths, values);
        Ok(())
    }
}
