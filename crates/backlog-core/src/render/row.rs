//! Backlog row formatting.

use serde::{Deserialize, Serialize};

use crate::domain::StoryKey;

/// Column widths of a backlog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLayout {
    pub key_width: usize,
    pub points_width: usize,
    pub status_width: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            key_width: 50,
            points_width: 6,
            status_width: 11,
        }
    }
}

/// `| {key} | {points} | {status} |` with left-aligned, space-padded columns
/// and a trailing newline. Values longer than their column are not truncated.
pub fn render_row(key: &StoryKey, points: u32, status: &str, layout: &RowLayout) -> String {
    format!(
        "| {key:<kw$} | {points:<pw$} | {status:<sw$} |\n",
        key = key.to_string(),
        kw = layout.key_width,
        pw = layout.points_width,
        sw = layout.status_width,
    )
}
