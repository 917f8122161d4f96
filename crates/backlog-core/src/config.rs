//! Generator configuration.
//!
//! Defaults mirror the usual planning layout: story documents in
//! `planning/agile/stories`, the backlog in `planning/agile/backlog.md`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::{DedupStrategy, GeneratorSettings};
use crate::domain::ids::validate_width;
use crate::domain::{BacklogError, DEFAULT_ID_WIDTH};
use crate::render::{DEFAULT_STATUS_LABEL, RowLayout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding one document per story.
    pub stories_dir: PathBuf,

    /// The shared tracking document.
    pub backlog_path: PathBuf,

    /// Digits in a story id.
    pub id_width: usize,

    /// Document extension without the dot.
    pub extension: String,

    /// Status written into documents and backlog rows.
    pub status_label: String,

    pub row_layout: RowLayout,

    pub dedup: DedupStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            stories_dir: PathBuf::from("planning/agile/stories"),
            backlog_path: PathBuf::from("planning/agile/backlog.md"),
            id_width: DEFAULT_ID_WIDTH,
            extension: "md".to_string(),
            status_label: DEFAULT_STATUS_LABEL.to_string(),
            row_layout: RowLayout::default(),
            dedup: DedupStrategy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BacklogError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BacklogError::InvalidConfig(format!("config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast checks before anything touches the disk.
    pub fn validate(&self) -> Result<(), BacklogError> {
        validate_width(self.id_width)?;

        if self.extension.is_empty()
            || self.extension.starts_with('.')
            || self.extension.contains(['/', '\\'])
        {
            return Err(BacklogError::InvalidConfig(format!(
                "extension must be a bare extension like `md`, got `{}`",
                self.extension
            )));
        }

        if self.status_label.trim().is_empty()
            || self.status_label.contains(['|', '\n', '\r'])
        {
            return Err(BacklogError::InvalidConfig(format!(
                "status label must be a non-empty single table cell, got `{}`",
                self.status_label
            )));
        }

        if self.stories_dir.as_os_str().is_empty() || self.backlog_path.as_os_str().is_empty() {
            return Err(BacklogError::InvalidConfig(
                "stories_dir and backlog_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            extension: self.extension.clone(),
            status_label: self.status_label.clone(),
            row_layout: self.row_layout,
            dedup: self.dedup,
        }
    }
}
