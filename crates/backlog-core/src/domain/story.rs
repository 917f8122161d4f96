//! Story records: the caller-supplied unit of work.
//!
//! A `StoryRecord` never carries an id. Ids are assigned by the generator
//! (see `ports::id_allocator`), which turns a record into an `AssignedStory`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{StoryId, StoryKey};

/// Category of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryType {
    #[serde(alias = "feature")]
    Feature,
    #[serde(alias = "bug")]
    Bug,
    #[serde(alias = "chore")]
    Chore,
    #[serde(alias = "spike")]
    Spike,
    #[serde(alias = "refactor")]
    Refactor,
    #[serde(alias = "docs")]
    Docs,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Feature => "Feature",
            StoryType::Bug => "Bug",
            StoryType::Chore => "Chore",
            StoryType::Spike => "Spike",
            StoryType::Refactor => "Refactor",
            StoryType::Docs => "Docs",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "As a {actor}, I want {desire}, so that {benefit}."
///
/// Missing parts deserialize as empty strings and are reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserStory {
    pub actor: String,
    pub desire: String,
    pub benefit: String,
}

impl UserStory {
    pub fn new(
        actor: impl Into<String>,
        desire: impl Into<String>,
        benefit: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            desire: desire.into(),
            benefit: benefit.into(),
        }
    }
}

/// A story to be rendered into a document and a backlog row.
///
/// Unknown fields are rejected on deserialization, so an input file that still
/// carries a hardcoded `id` fails loudly instead of being silently renumbered.
/// Missing fields deserialize as empty values instead, so that
/// `validate_batch` can report every incomplete record of a batch at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryRecord {
    /// Slug used in the file name (`ui_realtime_logs`).
    pub name: String,
    pub title: String,
    pub description: String,
    pub points: u32,
    /// `None` only when the input omitted it; rejected by validation.
    #[serde(rename = "type")]
    pub story_type: Option<StoryType>,
    pub user_story: UserStory,
    /// Rendered as an unchecked checklist, in order.
    pub acceptance_criteria: Vec<String>,
    /// Rendered as a numbered list, in order.
    pub testing: Vec<String>,
}

impl Default for StoryRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            description: String::new(),
            points: 0,
            story_type: None,
            user_story: UserStory::default(),
            acceptance_criteria: Vec::new(),
            testing: Vec::new(),
        }
    }
}

impl StoryRecord {
    /// Convenience constructor; the remaining fields are filled with the
    /// `with_*` builders. An incomplete record is rejected by validation.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            points: 1,
            story_type: Some(StoryType::Feature),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_type(mut self, story_type: StoryType) -> Self {
        self.story_type = Some(story_type);
        self
    }

    pub fn with_user_story(mut self, user_story: UserStory) -> Self {
        self.user_story = user_story;
        self
    }

    pub fn with_acceptance_criteria<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptance_criteria = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_testing<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.testing = steps.into_iter().map(Into::into).collect();
        self
    }
}

/// A record after id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedStory {
    pub id: StoryId,
    pub record: StoryRecord,
}

impl AssignedStory {
    pub fn new(id: StoryId, record: StoryRecord) -> Self {
        Self { id, record }
    }

    pub fn key(&self) -> StoryKey {
        StoryKey::new(self.id, self.record.name.clone())
    }
}
