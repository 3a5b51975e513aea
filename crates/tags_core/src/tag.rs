//! A named list of rules with OR semantics

use crate::error::{Result, TagsError};
use crate::rules::{MatchOptions, Rule, RuleKind};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Tag: matches a directory when any of its rules does.
///
/// Holds at most one rule per [`RuleKind`]; mutations always target that rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    name: String,
    rules: Vec<Rule>,
}

impl Tag {
    /// Create a tag with no rules
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Create a tag from rules, rejecting a second rule of the same kind
    pub fn from_rules(name: impl Into<String>, rules: Vec<Rule>) -> Result<Self> {
        let mut tag = Self::new(name);
        for rule in rules {
            if tag.rule(rule.kind()).is_some() {
                return Err(TagsError::config(format!(
                    "Tag \"{}\" has more than one \"{}\" rule",
                    tag.name,
                    rule.kind()
                )));
            }
            tag.rules.push(rule);
        }
        Ok(tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The rule of `kind`, if the tag has one
    pub fn rule(&self, kind: RuleKind) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.kind() == kind)
    }

    fn rule_mut(&mut self, kind: RuleKind) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|rule| rule.kind() == kind)
    }

    /// True when no rule has any parameter left. Such tags are not persisted.
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(Rule::is_empty)
    }

    /// Evaluate rules in order, stopping at the first match or the first error.
    pub fn matches(&self, dir: &Path, options: &MatchOptions) -> Result<bool> {
        for rule in &self.rules {
            if rule.evaluate(dir, options)? {
                debug!(tag = %self.name, rule = %rule.kind(), "matched");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Add parameters to the rule of `kind`, creating the rule if needed.
    ///
    /// A new rule is only appended once its parameters were accepted.
    pub fn add_rule(&mut self, kind: RuleKind, values: &[String]) -> Result<()> {
        if let Some(rule) = self.rule_mut(kind) {
            return rule.add(values);
        }

        let mut rule = Rule::empty(kind);
        rule.add(values)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Remove parameters from the rule of `kind`; empty `values` clears it.
    pub fn remove_rule(&mut self, kind: RuleKind, values: &[String]) -> Result<()> {
        let tag = self.name.clone();
        match self.rule_mut(kind) {
            Some(rule) => rule.remove(values),
            None => Err(TagsError::RuleNotFound { tag, kind }),
        }
    }

    /// Parse `{"file_exists": {...}, "in_path": {...}}`.
    ///
    /// Rules are kept in canonical kind order regardless of key order.
    pub fn from_config(name: &str, fragment: &Value) -> Result<Self> {
        let object = fragment.as_object().ok_or_else(|| {
            TagsError::config(format!("Tag \"{name}\": expected an object of rules, found {fragment}"))
        })?;

        let mut rules = Vec::with_capacity(object.len());
        for (key, rule_cfg) in object {
            let kind: RuleKind = key
                .parse()
                .map_err(|_| TagsError::config(format!("Tag \"{name}\": unknown rule type \"{key}\"")))?;
            let rule = Rule::from_config(kind, rule_cfg)
                .map_err(|e| TagsError::config(format!("Tag \"{name}\": {}", strip_config_prefix(e))))?;
            rules.push(rule);
        }
        rules.sort_by_key(Rule::kind);

        Self::from_rules(name, rules)
    }

    /// Serialize non-empty rules.
    pub fn to_config(&self) -> Value {
        let rules: Map<String, Value> = self
            .rules
            .iter()
            .filter(|rule| !rule.is_empty())
            .map(|rule| (rule.kind().to_string(), rule.to_config()))
            .collect();
        Value::Object(rules)
    }
}

fn strip_config_prefix(err: TagsError) -> String {
    match err {
        TagsError::Config(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FileExists, InPath};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_creates_then_extends_rule() {
        let mut tag = Tag::new("rust");
        tag.add_rule(RuleKind::FileExists, &args(&["Cargo.toml"])).unwrap();
        tag.add_rule(RuleKind::FileExists, &args(&["rust-toolchain"])).unwrap();

        assert_eq!(tag.rules().len(), 1);
        assert_eq!(
            tag.rule(RuleKind::FileExists),
            Some(&Rule::FileExists(FileExists::new(args(&["Cargo.toml", "rust-toolchain"]))))
        );
    }

    #[test]
    fn test_failed_add_leaves_tag_untouched() {
        let mut tag = Tag::new("react");
        let err = tag.add_rule(RuleKind::FileContains, &args(&["package.json"])).unwrap_err();
        assert!(matches!(err, TagsError::Argument(_)));
        assert!(tag.rules().is_empty());
    }

    #[test]
    fn test_add_then_remove_leaves_empty_rule() {
        let mut tag = Tag::new("make");
        tag.add_rule(RuleKind::FileExists, &args(&["X"])).unwrap();
        tag.remove_rule(RuleKind::FileExists, &args(&["X"])).unwrap();

        let rule = tag.rule(RuleKind::FileExists).expect("rule still registered");
        assert!(rule.is_empty());
        assert!(tag.is_empty());
    }

    #[test]
    fn test_remove_missing_rule() {
        let mut tag = Tag::new("make");
        let err = tag.remove_rule(RuleKind::InPath, &[]).unwrap_err();
        assert!(matches!(
            err,
            TagsError::RuleNotFound { ref tag, kind: RuleKind::InPath } if tag == "make"
        ));
    }

    #[test]
    fn test_matches_any_rule() {
        let dir = TempDir::new().unwrap();
        let mut tag = Tag::new("mixed");
        tag.add_rule(RuleKind::FileExists, &args(&["Makefile"])).unwrap();
        tag.add_rule(RuleKind::InPath, &args(&[dir.path().to_str().unwrap()])).unwrap();

        // Only in_path matches.
        assert!(tag.matches(dir.path(), &MatchOptions::default()).unwrap());
    }

    #[test]
    fn test_first_match_short_circuits_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Makefile"), "").unwrap();
        fs::create_dir(dir.path().join("package.json")).unwrap();

        let tag = Tag::from_rules(
            "t",
            vec![
                Rule::FileExists(FileExists::new(args(&["Makefile"]))),
                Rule::from_config(RuleKind::FileContains, &json!({"search": {"package.json": "x"}}))
                    .unwrap(),
            ],
        )
        .unwrap();
        assert!(tag.matches(dir.path(), &MatchOptions::default()).unwrap());

        let tag = Tag::from_rules("t", tag.rules().iter().rev().cloned().collect()).unwrap();
        assert!(tag.matches(dir.path(), &MatchOptions::default()).is_err());
    }

    #[test]
    fn test_duplicate_kinds_rejected() {
        let err = Tag::from_rules(
            "dup",
            vec![
                Rule::InPath(InPath::new(args(&["/a"]))),
                Rule::InPath(InPath::new(args(&["/b"]))),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TagsError::Config(_)));
    }

    #[test]
    fn test_from_config_canonical_order_and_errors() {
        let tag = Tag::from_config(
            "web",
            &json!({
                "in_path": {"paths": ["/srv"]},
                "file_exists": {"files": ["index.html"]},
            }),
        )
        .unwrap();
        let kinds: Vec<RuleKind> = tag.rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, vec![RuleKind::FileExists, RuleKind::InPath]);

        let err = Tag::from_config("web", &json!({"dir_exists": {"files": []}})).unwrap_err();
        assert!(err.to_string().contains("dir_exists"));

        assert!(Tag::from_config("web", &json!(["file_exists"])).is_err());
    }

    #[test]
    fn test_to_config_skips_empty_rules() {
        let mut tag = Tag::new("t");
        tag.add_rule(RuleKind::FileExists, &args(&["a"])).unwrap();
        tag.add_rule(RuleKind::InPath, &args(&["/b"])).unwrap();
        tag.remove_rule(RuleKind::InPath, &[]).unwrap();

        assert_eq!(tag.to_config(), json!({"file_exists": {"files": ["a"]}}));
    }
}
