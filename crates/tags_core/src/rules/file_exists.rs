use super::{add_list_entries, join_relative, remove_list_entries, string_list_from_config, RuleKind};
use crate::error::{Result, TagsError};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Matches when any listed relative path exists under the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileExists {
    files: Vec<String>,
}

impl FileExists {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub(crate) fn from_config(fragment: &Map<String, Value>) -> Result<Self> {
        string_list_from_config(RuleKind::FileExists, fragment).map(Self::new)
    }

    /// Files and directories both count; symlinks are followed.
    pub fn evaluate(&self, dir: &Path) -> Result<bool> {
        for file in &self.files {
            debug!(file = %file, "file_exists");

            let candidate = join_relative(dir, file);
            match fs::metadata(&candidate) {
                Ok(_) => return Ok(true),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(TagsError::io(candidate, e)),
            }
        }

        Ok(false)
    }

    pub fn add(&mut self, values: &[String]) -> Result<()> {
        add_list_entries(RuleKind::FileExists, &mut self.files, values)
    }

    pub fn remove(&mut self, values: &[String]) -> Result<()> {
        remove_list_entries(&mut self.files, values);
        Ok(())
    }
}
