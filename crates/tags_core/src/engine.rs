//! Matching engine: evaluate one directory against every tag
//!
//! Tags are evaluated in isolation. A tag whose evaluation fails is reported
//! with its error and counts as non-matching; the rest of the scan goes on.
//!
//! In parallel mode each tag runs as its own blocking task on a tokio
//! runtime and outcomes arrive in completion order.

use crate::error::{Result, TagsError};
use crate::rules::MatchOptions;
use crate::tag::Tag;
use crate::tag_set::TagSet;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Sequential or parallel evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvalMode {
    #[default]
    Sequential,
    Parallel,
}

/// Result of evaluating one tag.
#[derive(Debug)]
pub struct TagOutcome {
    pub name: String,
    pub result: Result<bool>,
}

impl TagOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self.result, Ok(true))
    }
}

/// Every tag's outcome, in emission order.
#[derive(Debug, Default)]
pub struct MatchReport {
    pub outcomes: Vec<TagOutcome>,
}

impl MatchReport {
    /// Names of matching tags, in emission order.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_match())
            .map(|o| o.name.as_str())
    }

    /// Tags whose evaluation failed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &TagsError)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Err(e) => Some((o.name.as_str(), e)),
            Ok(_) => None,
        })
    }
}

/// Evaluates directories against a tag set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    options: MatchOptions,
}

impl MatchEngine {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Names of the tags matching `dir`. Per-tag failures are logged and skipped.
    pub fn find_matching_tags(&self, tags: &TagSet, dir: &Path, mode: EvalMode) -> Result<Vec<String>> {
        let report = self.evaluate(tags, dir, mode)?;
        Ok(report.matched().map(str::to_string).collect())
    }

    /// Evaluate every tag and collect outcomes.
    ///
    /// Only fails when the parallel runtime cannot be started. Parallel mode
    /// owns its runtime, so callers already inside tokio get
    /// [`TagsError::TaskFailed`] and should await [`Self::evaluate_parallel`].
    pub fn evaluate(&self, tags: &TagSet, dir: &Path, mode: EvalMode) -> Result<MatchReport> {
        let report = match mode {
            EvalMode::Sequential => {
                info!(dir = %dir.display(), "Checking tag rules in series");
                self.evaluate_sequential(tags, dir)
            }
            EvalMode::Parallel => {
                info!(dir = %dir.display(), "Checking tag rules in parallel");
                if tokio::runtime::Handle::try_current().is_ok() {
                    return Err(TagsError::TaskFailed(
                        "Parallel evaluation cannot start a runtime inside a running runtime; await evaluate_parallel instead".to_string(),
                    ));
                }
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .map_err(|e| TagsError::TaskFailed(format!("Failed to start runtime: {e}")))?;
                runtime.block_on(self.evaluate_parallel(tags, dir))
            }
        };

        for (name, err) in report.failures() {
            error!(tag = %name, error = %err, "Tag evaluation failed");
        }
        Ok(report)
    }

    fn evaluate_sequential(&self, tags: &TagSet, dir: &Path) -> MatchReport {
        let outcomes = tags
            .iter()
            .map(|tag| {
                debug!(tag = %tag.name(), "=>");
                TagOutcome {
                    name: tag.name().to_string(),
                    result: tag.matches(dir, &self.options),
                }
            })
            .collect();
        MatchReport { outcomes }
    }

    /// Spawn one blocking task per tag, join them all, and collect outcomes
    /// in completion order. Must run inside a tokio runtime.
    ///
    /// A task that panics is reported as [`TagsError::TaskFailed`] under its
    /// tag name.
    pub async fn evaluate_parallel(&self, tags: &TagSet, dir: &Path) -> MatchReport {
        let dir: Arc<PathBuf> = Arc::new(dir.to_path_buf());
        let mut set = JoinSet::new();
        let mut pending: BTreeSet<String> = BTreeSet::new();

        for tag in tags.iter() {
            let tag: Tag = tag.clone();
            let dir = Arc::clone(&dir);
            let options = self.options;
            pending.insert(tag.name().to_string());

            set.spawn_blocking(move || {
                debug!(tag = %tag.name(), "=>");
                let result = tag.matches(&dir, &options);
                (tag.name().to_string(), result)
            });
        }

        let mut outcomes = Vec::with_capacity(tags.len());
        let mut join_errors = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((name, result)) => {
                    pending.remove(&name);
                    outcomes.push(TagOutcome { name, result });
                }
                Err(e) => {
                    warn!(error = %e, "Evaluation task did not complete");
                    join_errors.push(e.to_string());
                }
            }
        }

        // Tasks that never returned are the ones that failed to join.
        let reason = match join_errors.as_slice() {
            [only] => only.clone(),
            _ => "evaluation task panicked or was cancelled".to_string(),
        };
        for name in pending {
            outcomes.push(TagOutcome {
                name,
                result: Err(TagsError::TaskFailed(reason.clone())),
            });
        }

        MatchReport { outcomes }
    }
}
