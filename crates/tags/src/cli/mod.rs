//! CLI module for tags
//!
//! One module per command. Commands receive a [`Context`] holding the
//! resolved rules file path and return `anyhow::Result`, with user-facing
//! failures wrapped in [`error::HelpfulError`].

pub mod add;
pub mod error;
pub mod find;
pub mod help;
pub mod rm;
pub mod show;

use error::HelpfulError;
use std::path::PathBuf;
use tags_core::{load_tag_set, save_tag_set, TagSet};
use tracing::{debug, info};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: PathBuf,
    pub parallel: bool,
}

impl Context {
    /// Load the rules file, failing when it does not exist.
    pub fn load(&self) -> anyhow::Result<TagSet> {
        info!(path = %self.config_path.display(), "Reading config");
        let set = load_tag_set(&self.config_path)
            .map_err(|e| HelpfulError::from_tags_error(e, &self.config_path))?;
        debug!(tags = set.len(), "Read tags");
        Ok(set)
    }

    /// Load the rules file, starting empty when it does not exist yet.
    pub fn load_or_default(&self) -> anyhow::Result<TagSet> {
        match load_tag_set(&self.config_path) {
            Ok(set) => Ok(set),
            Err(tags_core::TagsError::NotFound(_)) => {
                info!(path = %self.config_path.display(), "Config not found, starting empty");
                Ok(TagSet::new())
            }
            Err(e) => Err(HelpfulError::from_tags_error(e, &self.config_path).into()),
        }
    }

    pub fn save(&self, set: &TagSet) -> anyhow::Result<()> {
        save_tag_set(&self.config_path, set)
            .map_err(|e| HelpfulError::from_tags_error(e, &self.config_path))?;
        info!(path = %self.config_path.display(), "Saved config");
        Ok(())
    }
}
