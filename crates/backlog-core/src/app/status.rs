//! Status - 実行結果のレポート
//!
//! CLI はこれを人間向けの 1 行、または `--json` で JSON として出力します。

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{AssignedStory, StoryKey};

/// Outcome of a `generate` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Number of story documents written.
    pub generated: usize,
    /// Whether the backlog received an append.
    pub tracking_updated: bool,
    pub documents: Vec<PathBuf>,
    pub appended_keys: Vec<StoryKey>,
    /// Keys already represented in the backlog.
    pub skipped_keys: Vec<StoryKey>,
}

impl GenerationReport {
    pub fn empty() -> Self {
        Self::default()
    }

    /// One-line summary for the operator.
    pub fn summary(&self) -> String {
        match (self.generated, self.tracking_updated) {
            (0, _) => "No stories to generate.".to_string(),
            (n, true) => format!("Generated {n} stories and updated backlog."),
            (n, false) => format!("Generated {n} stories; backlog already up to date."),
        }
    }
}

/// Outcome of the read-check-append phase alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingUpdate {
    pub updated: bool,
    pub appended_keys: Vec<StoryKey>,
    pub skipped_keys: Vec<StoryKey>,
}

/// A story ready to be written: assigned id, target file name and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDocument {
    pub story: AssignedStory,
    pub file_name: String,
    pub body: String,
}

/// Everything `generate` would write, computed without touching the disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    pub documents: Vec<PlannedDocument>,
}

impl GenerationPlan {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn stories(&self) -> Vec<AssignedStory> {
        self.documents.iter().map(|d| d.story.clone()).collect()
    }
}
