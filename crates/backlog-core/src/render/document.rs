//! Story document body.

use std::fmt::Write;

use crate::domain::{AssignedStory, StoryType, UserStory};

/// Status written into new documents and backlog rows.
pub const DEFAULT_STATUS_LABEL: &str = "READY";

/// Renders the markdown body of a story document.
///
/// Layout: title heading, metadata block (status, points, id, type),
/// description, user story, acceptance criteria as an unchecked checklist,
/// numbered testing steps, and an empty review section.
pub fn render_document(story: &AssignedStory, status: &str) -> String {
    let record = &story.record;
    let mut out = String::new();

    // String への write! は失敗しない
    let _ = writeln!(out, "# {}", record.title);
    out.push('\n');
    let _ = writeln!(out, "- **Status:** {status}");
    let _ = writeln!(out, "- **Points:** {}", record.points);
    let _ = writeln!(out, "- **Story ID:** {}", story.id);
    let story_type = record.story_type.as_ref().map_or("", StoryType::as_str);
    let _ = writeln!(out, "- **Type:** {story_type}");
    out.push('\n');

    out.push_str("## Description\n");
    let _ = writeln!(out, "{}", record.description);
    out.push('\n');

    out.push_str("## User Story\n");
    let _ = writeln!(out, "{}", render_user_story(&record.user_story));
    out.push('\n');

    out.push_str("## Acceptance Criteria\n");
    for criterion in &record.acceptance_criteria {
        let _ = writeln!(out, "- [ ] {criterion}");
    }

    out.push_str("\n## Testing\n");
    for (i, step) in record.testing.iter().enumerate() {
        let _ = writeln!(out, "{}. {step}", i + 1);
    }

    out.push_str("\n## Review\n");
    out
}

/// Narrative form of a user story (three lines, no trailing newline).
pub fn render_user_story(user_story: &UserStory) -> String {
    format!(
        "**As a** {},\n**I want** {},\n**So that** {}.",
        user_story.actor.trim(),
        user_story.desire.trim(),
        strip_period(user_story.benefit.trim()),
    )
}

/// The template supplies the closing period, so exactly one is dropped.
fn strip_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StoryId, StoryRecord, StoryType};

    fn story() -> AssignedStory {
        let record = StoryRecord::new("ui_realtime_logs", "Implement Realtime Log Streaming")
            .with_points(5)
            .with_type(StoryType::Feature)
            .with_description("Connect the Experiment Monitor to the log stream.")
            .with_user_story(UserStory::new(
                "User",
                "to see logs as they happen",
                "I don't have to refresh.",
            ))
            .with_acceptance_criteria(["Subscribes to log stream.", "Autoscroll behavior."])
            .with_testing(["Run experiment.", "Watch logs appear."]);
        AssignedStory::new(StoryId::new(36, 3).unwrap(), record)
    }

    #[test]
    fn renders_full_layout() {
        let expected = "\
# Implement Realtime Log Streaming

- **Status:** READY
- **Points:** 5
- **Story ID:** 036
- **Type:** Feature

## Description
Connect the Experiment Monitor to the log stream.

## User Story
**As a** User,
**I want** to see logs as they happen,
**So that** I don't have to refresh.

## Acceptance Criteria
- [ ] Subscribes to log stream.
- [ ] Autoscroll behavior.

## Testing
1. Run experiment.
2. Watch logs appear.

## Review
";
        assert_eq!(render_document(&story(), DEFAULT_STATUS_LABEL), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let story = story();
        assert_eq!(
            render_document(&story, "READY"),
            render_document(&story, "READY")
        );
    }

    #[test]
    fn status_label_is_used() {
        let body = render_document(&story(), "IN PROGRESS");
        assert!(body.contains("- **Status:** IN PROGRESS\n"));
    }

    #[test]
    fn user_story_does_not_double_the_period() {
        let rendered = render_user_story(&UserStory::new("Operator", "x", "y."));
        assert!(rendered.ends_with("**So that** y."));
        let rendered = render_user_story(&UserStory::new("Operator", "x", "y"));
        assert!(rendered.ends_with("**So that** y."));
    }

    #[test]
    fn user_story_keeps_an_ellipsis() {
        let rendered = render_user_story(&UserStory::new("Operator", "x", "logs, metrics, etc..."));
        assert!(rendered.ends_with("**So that** logs, metrics, etc..."));
    }
}
