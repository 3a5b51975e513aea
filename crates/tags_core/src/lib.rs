//! Tags Core - Rule Evaluation & Tag Matching
//!
//! Tags classify directories. Each tag owns a small set of rules, and a
//! directory receives the tag when any one of those rules matches it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ rules.json  │     │   TagSet    │     │ MatchEngine │     │  Reporter   │
//! │  (config)   │────▶│ (tag → rule │────▶│ (seq / par  │────▶│ (tag names) │
//! │             │     │   variants) │     │  per tag)   │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Rule**: one predicate kind (`file_exists`, `file_contains`, `in_path`) with its parameters
//! - **Tag**: named list of rules, OR semantics, at most one rule per kind
//! - **TagSet**: every configured tag, loaded from and saved to one JSON file
//! - **MatchEngine**: evaluates a directory against every tag, isolating per-tag failures

pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod rules;
pub mod tag;
pub mod tag_set;

// Re-exports for convenience
pub use config::{load_tag_set, save_tag_set};
pub use engine::{EvalMode, MatchEngine, MatchReport, TagOutcome};
pub use error::{Result, TagsError};
pub use rules::{FileContains, FileExists, InPath, MatchOptions, PrefixMode, Rule, RuleKind};
pub use tag::Tag;
pub use tag_set::TagSet;
