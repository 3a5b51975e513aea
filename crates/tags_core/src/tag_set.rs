//! The full set of configured tags and the mutation layer used by `add`/`rm`
//!
//! Mutations either succeed completely or leave the set untouched; on success
//! the caller persists the whole set with [`crate::config::save_tag_set`].

use crate::error::{Result, TagsError};
use crate::rules::RuleKind;
use crate::tag::Tag;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Tags keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeMap<String, Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Insert or replace a tag by its name.
    pub fn insert(&mut self, tag: Tag) -> Option<Tag> {
        self.tags.insert(tag.name().to_string(), tag)
    }

    /// `add <tag> <kind> <values...>`: the tag is created when missing.
    pub fn add_rule(&mut self, tag_name: &str, kind: &str, values: &[String]) -> Result<()> {
        let kind: RuleKind = kind.parse()?;

        match self.tags.get_mut(tag_name) {
            Some(tag) => tag.add_rule(kind, values),
            None => {
                debug!(tag = %tag_name, "Tag not found, creating it");
                let mut tag = Tag::new(tag_name);
                tag.add_rule(kind, values)?;
                self.insert(tag);
                Ok(())
            }
        }
    }

    /// `rm <tag> <kind> [values...]`
    pub fn remove_rule(&mut self, tag_name: &str, kind: &str, values: &[String]) -> Result<()> {
        let kind: RuleKind = kind.parse()?;
        self.tags
            .get_mut(tag_name)
            .ok_or_else(|| TagsError::TagNotFound(tag_name.to_string()))?
            .remove_rule(kind, values)
    }

    /// `rm <tag>`: drop the whole tag.
    pub fn remove_tag(&mut self, tag_name: &str) -> Result<Tag> {
        self.tags
            .remove(tag_name)
            .ok_or_else(|| TagsError::TagNotFound(tag_name.to_string()))
    }

    /// Parse the root config object `{"<tag>": {<rules>}}`.
    pub fn from_config(root: &Value) -> Result<Self> {
        let object = root.as_object().ok_or_else(|| {
            TagsError::config(format!("Config root must be an object of tags, found {root}"))
        })?;

        let mut set = Self::new();
        for (name, tag_cfg) in object {
            set.insert(Tag::from_config(name, tag_cfg)?);
        }
        Ok(set)
    }

    /// Serialize, omitting tags with no non-empty rule.
    pub fn to_config(&self) -> Value {
        let tags: Map<String, Value> = self
            .tags
            .iter()
            .filter(|(_, tag)| !tag.is_empty())
            .map(|(name, tag)| (name.clone(), tag.to_config()))
            .collect();
        Value::Object(tags)
    }
}
