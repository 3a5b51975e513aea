//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;
use tags_core::{RuleKind, TagsError};

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Rules file does not exist
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_context("No tags have been configured with this rules file yet")
            .with_suggestions([
                "TRY: Create a tag: tags add make file_exists Makefile".to_string(),
                "TRY: Point at another file with -c <PATH> or TAGS_CONFIG".to_string(),
            ])
    }

    /// Rules file is not valid JSON
    pub fn config_parse(path: &Path, details: &str) -> Self {
        Self::new(format!("JSON parse error: {}", details))
            .with_context(format!("Failed to parse rules file: {}", path.display()))
            .with_suggestions([
                format!("TRY: Validate the JSON: python -m json.tool {}", path.display()),
                "TRY: See the expected layout: tags help config".to_string(),
            ])
    }

    /// Rules file is JSON but not a valid tag configuration
    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid rules file: {}", details))
            .with_context(format!("Rules file: {}", path.display()))
            .with_suggestions([
                "TRY: Each rule type takes an object: {\"files\": [...]}, {\"search\": {...}}, {\"paths\": [...]}".to_string(),
                "TRY: See the rule formats: tags help rules".to_string(),
            ])
    }

    /// Unknown rule type on the command line
    pub fn unknown_rule_kind(kind: &str) -> Self {
        let known: Vec<&str> = RuleKind::ALL.iter().map(|k| k.as_str()).collect();
        Self::new(format!("Unknown rule type: {}", kind))
            .with_context(format!("Valid rule types: {}", known.join(", ")))
            .with_suggestion("TRY: tags help rules")
    }

    /// Tag has no rule of that type
    pub fn rule_not_found(tag: &str, kind: RuleKind) -> Self {
        Self::new(format!("Rule \"{}\" not found in tag \"{}\"", kind, tag))
            .with_suggestion("TRY: List tags and rules: tags show")
    }

    /// Tag does not exist
    pub fn tag_not_found(tag: &str) -> Self {
        Self::new(format!("Tag \"{}\" not found", tag))
            .with_suggestion("TRY: List tags and rules: tags show")
    }

    /// Bad values for add/rm
    pub fn invalid_arguments(details: &str) -> Self {
        Self::new(details.to_string())
            .with_suggestions([
                "TRY: file_exists and in_path take one or more paths".to_string(),
                "TRY: file_contains takes <FILE> <TEXT> pairs".to_string(),
            ])
    }

    /// Render a core error for the user
    pub fn from_tags_error(err: TagsError, config_path: &Path) -> Self {
        match err {
            TagsError::NotFound(path) => Self::config_not_found(&path),
            TagsError::Parse { path, source } => Self::config_parse(&path, &source.to_string()),
            TagsError::Config(details) => Self::invalid_config(config_path, &details),
            TagsError::UnknownRuleKind(kind) => Self::unknown_rule_kind(&kind),
            TagsError::RuleNotFound { tag, kind } => Self::rule_not_found(&tag, kind),
            TagsError::TagNotFound(tag) => Self::tag_not_found(&tag),
            TagsError::Argument(details) => Self::invalid_arguments(&details),
            TagsError::Io { path, source } => Self::new(format!("Cannot access {}", path.display()))
                .with_context(source.to_string())
                .with_suggestion(format!("TRY: Check permissions: ls -la {}", path.display())),
            other => Self::new(other.to_string()),
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
