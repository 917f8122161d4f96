//! Validate - バッチ全体の事前検証
//!
//! 書き込みの前にバッチ全体を検証し、違反をすべて集めて返します。
//! 途中で不正なレコードが見つかって中途半端なバッチが残ることを防ぐためです。

use thiserror::Error;

use super::errors::BacklogError;
use super::ids::KEY_SEPARATOR;
use super::story::StoryRecord;

/// A single problem with a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("`{0}` is missing")]
    MissingField(&'static str),

    #[error("`points` must be a positive integer")]
    NonPositivePoints,

    #[error("`{field}` must contain at least one item")]
    EmptyList { field: &'static str },

    #[error("`{field}` item #{index} must not be empty")]
    EmptyListItem { field: &'static str, index: usize },

    #[error("`{0}` is not a valid slug (lowercase letters and digits separated by single underscores)")]
    InvalidSlug(String),
}

/// A violation tagged with the offending record's position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record #{index} ({name}): {violation}")]
pub struct RecordViolation {
    pub index: usize,
    pub name: String,
    pub violation: Violation,
}

/// Collects every violation of one record.
pub fn validate_record(record: &StoryRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.name.trim().is_empty() {
        violations.push(Violation::EmptyField("name"));
    } else if !is_slug(&record.name) {
        violations.push(Violation::InvalidSlug(record.name.clone()));
    }

    let required = [
        ("title", &record.title),
        ("description", &record.description),
        ("user_story.actor", &record.user_story.actor),
        ("user_story.desire", &record.user_story.desire),
        ("user_story.benefit", &record.user_story.benefit),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            violations.push(Violation::EmptyField(field));
        }
    }

    if record.story_type.is_none() {
        violations.push(Violation::MissingField("type"));
    }

    if record.points == 0 {
        violations.push(Violation::NonPositivePoints);
    }

    check_list("acceptance_criteria", &record.acceptance_criteria, &mut violations);
    check_list("testing", &record.testing, &mut violations);

    violations
}

/// Validates the whole batch up front.
///
/// Returns `BacklogError::InvalidRecords` with every violation of every record
/// when anything is wrong.
pub fn validate_batch(records: &[StoryRecord]) -> Result<(), BacklogError> {
    let violations: Vec<RecordViolation> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| {
            validate_record(record)
                .into_iter()
                .map(move |violation| RecordViolation {
                    index,
                    name: record.name.clone(),
                    violation,
                })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(BacklogError::InvalidRecords(violations))
    }
}

/// `ui_realtime_logs` style slug: `[a-z0-9]+(_[a-z0-9]+)*`.
pub fn is_slug(name: &str) -> bool {
    !name.is_empty()
        && name.split(KEY_SEPARATOR).all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn check_list(field: &'static str, items: &[String], violations: &mut Vec<Violation>) {
    if items.is_empty() {
        violations.push(Violation::EmptyList { field });
        return;
    }
    for (index, item) in items.iter().enumerate() {
        if item.trim().is_empty() {
            violations.push(Violation::EmptyListItem { field, index });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::{StoryType, UserStory};
    use rstest::rstest;

    fn complete(name: &str) -> StoryRecord {
        StoryRecord::new(name, "Title")
            .with_description("Description")
            .with_points(3)
            .with_type(StoryType::Chore)
            .with_user_story(UserStory::new("Operator", "something", "a reason"))
            .with_acceptance_criteria(["works"])
            .with_testing(["run it"])
    }

    #[rstest]
    #[case::simple("bar", true)]
    #[case::underscored("ui_realtime_logs", true)]
    #[case::digits("v2_api", true)]
    #[case::uppercase("Bar", false)]
    #[case::hyphen("ui-logs", false)]
    #[case::leading_underscore("_bar", false)]
    #[case::trailing_underscore("bar_", false)]
    #[case::double_underscore("bar__baz", false)]
    #[case::space("bar baz", false)]
    #[case::empty("", false)]
    fn slug_rules(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_slug(name), expected);
    }

    #[test]
    fn complete_record_has_no_violations() {
        assert!(validate_record(&complete("bar")).is_empty());
    }

    #[test]
    fn incomplete_record_reports_every_violation() {
        let record = StoryRecord::new("bar", "   ").with_points(0);
        let violations = validate_record(&record);

        assert!(violations.contains(&Violation::EmptyField("title")));
        assert!(violations.contains(&Violation::EmptyField("description")));
        assert!(violations.contains(&Violation::EmptyField("user_story.actor")));
        assert!(violations.contains(&Violation::NonPositivePoints));
        assert!(violations.contains(&Violation::EmptyList {
            field: "acceptance_criteria"
        }));
        assert!(violations.contains(&Violation::EmptyList { field: "testing" }));
    }

    #[test]
    fn blank_list_items_are_reported_with_their_position() {
        let record = complete("bar").with_testing(["step one", " "]);
        assert_eq!(
            validate_record(&record),
            vec![Violation::EmptyListItem {
                field: "testing",
                index: 1
            }]
        );
    }

    #[test]
    fn batch_violations_carry_record_index() {
        let records = vec![complete("ok"), complete("Not_A_Slug"), complete("fine")];
        let err = validate_batch(&records).unwrap_err();
        match err {
            BacklogError::InvalidRecords(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].index, 1);
                assert_eq!(violations[0].name, "Not_A_Slug");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn omitted_fields_are_reported_per_record() {
        let json = r#"[
            { "name": "bar", "description": "d", "points": 1, "type": "Chore",
              "user_story": { "actor": "a", "desire": "b", "benefit": "c" },
              "acceptance_criteria": ["a"], "testing": ["t"] },
            { "name": "baz", "title": "t", "points": 1,
              "user_story": { "actor": "a", "desire": "b", "benefit": "c" },
              "acceptance_criteria": ["a"], "testing": ["t"] }
        ]"#;
        let records: Vec<StoryRecord> = serde_json::from_str(json).unwrap();

        let Err(BacklogError::InvalidRecords(violations)) = validate_batch(&records) else {
            panic!("batch should be rejected");
        };
        let found: Vec<(usize, Violation)> = violations
            .into_iter()
            .map(|v| (v.index, v.violation))
            .collect();
        assert_eq!(
            found,
            vec![
                (0, Violation::EmptyField("title")),
                (1, Violation::EmptyField("description")),
                (1, Violation::MissingField("type")),
            ]
        );
    }

    #[test]
    fn empty_batch_is_valid() {
        assert!(validate_batch(&[]).is_ok());
    }
}
