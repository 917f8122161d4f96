//! Backlog - 冪等な追記の計画
//!
//! backlog の現在の内容とこのバッチのストーリーから、
//! 「まだ載っていない行」だけを入力順に組み立てます。
//! I/O はしません（読み書きは `DocumentGenerator` が行う）。
//!
//! # 重複判定（DedupStrategy）
//! - **Substring**（デフォルト）: `{id}_{name}` の文字列が backlog のどこかに
//!   含まれていれば載っているとみなす。無関係な文脈に同じ文字列があっても抑止される。
//! - **RowKeys**: 表の行を解析して先頭セルをキー集合にし、その差集合だけを追加する。
//!
//! どちらの場合も、同じバッチ内で同じキーが 2 回出てきたら 1 行だけ追加します。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{AssignedStory, StoryKey};
use crate::render::{RowLayout, render_row};

/// How existing backlog rows are recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    /// Literal substring match of the key anywhere in the document.
    #[default]
    Substring,
    /// Set difference against the first cell of every table row.
    RowKeys,
}

/// Rows to append plus the bookkeeping for the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendPlan {
    /// Concatenated rows, empty when nothing is new.
    pub rows: String,
    pub appended: Vec<StoryKey>,
    pub skipped: Vec<StoryKey>,
}

impl AppendPlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes which stories still need a backlog row.
///
/// When the document does not end with a newline, the rows start with one.
pub fn plan_append(
    existing: &str,
    stories: &[AssignedStory],
    strategy: DedupStrategy,
    layout: &RowLayout,
    status: &str,
) -> AppendPlan {
    let row_keys = match strategy {
        DedupStrategy::Substring => HashSet::new(),
        DedupStrategy::RowKeys => existing_row_keys(existing),
    };

    let mut plan = AppendPlan::default();
    let mut seen = HashSet::new();

    for story in stories {
        let key = story.key();
        let key_text = key.to_string();

        let present = match strategy {
            DedupStrategy::Substring => existing.contains(&key_text),
            DedupStrategy::RowKeys => row_keys.contains(key_text.as_str()),
        };

        if present || !seen.insert(key_text) {
            plan.skipped.push(key);
            continue;
        }

        plan.rows
            .push_str(&render_row(&key, story.record.points, status, layout));
        plan.appended.push(key);
    }

    // 改行で終わっていない最終行に行を連結しない
    if !plan.rows.is_empty() && !existing.is_empty() && !existing.ends_with('\n') {
        plan.rows.insert(0, '\n');
    }

    plan
}

/// Keys found in the first cell of the document's table rows.
///
/// Lines that do not start with `|`, header separators (`|---|---|`) and
/// empty cells are ignored.
pub fn existing_row_keys(document: &str) -> HashSet<&str> {
    document
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('|'))
        .filter_map(|line| line[1..].split('|').next())
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .filter(|cell| !cell.chars().all(|c| matches!(c, '-' | ':' | ' ')))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StoryId, StoryRecord};
    use rstest::rstest;

    fn story(id: u32, name: &str, points: u32) -> AssignedStory {
        AssignedStory::new(
            StoryId::new(id, 3).unwrap(),
            StoryRecord::new(name, name).with_points(points),
        )
    }

    const BACKLOG: &str = "\
# Backlog

| Story                                              | Points | Status      |
|----------------------------------------------------|--------|-------------|
| 003_foo                                            | 2      | DONE        |
";

    #[rstest]
    #[case::substring(DedupStrategy::Substring)]
    #[case::row_keys(DedupStrategy::RowKeys)]
    fn new_stories_are_appended_in_order(#[case] strategy: DedupStrategy) {
        let stories = [story(4, "bar", 3), story(5, "baz", 5)];
        let plan = plan_append(BACKLOG, &stories, strategy, &RowLayout::default(), "READY");

        let keys: Vec<String> = plan.appended.iter().map(ToString::to_string).collect();
        assert_eq!(keys, ["004_bar", "005_baz"]);
        assert!(plan.skipped.is_empty());

        let lines: Vec<&str> = plan.rows.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("| 004_bar "));
        assert!(lines[1].starts_with("| 005_baz "));
    }

    #[rstest]
    #[case::substring(DedupStrategy::Substring)]
    #[case::row_keys(DedupStrategy::RowKeys)]
    fn existing_rows_are_skipped(#[case] strategy: DedupStrategy) {
        let stories = [story(3, "foo", 2), story(4, "bar", 3)];
        let plan = plan_append(BACKLOG, &stories, strategy, &RowLayout::default(), "READY");

        assert_eq!(plan.appended.len(), 1);
        assert_eq!(plan.appended[0].to_string(), "004_bar");
        assert_eq!(plan.skipped[0].to_string(), "003_foo");
    }

    #[test]
    fn substring_match_anywhere_suppresses_the_row() {
        let backlog = "See 004_bar for context.\n";
        let plan = plan_append(
            backlog,
            &[story(4, "bar", 1)],
            DedupStrategy::Substring,
            &RowLayout::default(),
            "READY",
        );
        assert!(plan.is_empty());
        assert_eq!(plan.skipped.len(), 1);
    }

    #[test]
    fn row_keys_ignore_mentions_outside_the_first_cell() {
        let backlog = "See 004_bar for context.\n| 001_a | 1 | READY |\n";
        let plan = plan_append(
            backlog,
            &[story(4, "bar", 1)],
            DedupStrategy::RowKeys,
            &RowLayout::default(),
            "READY",
        );
        assert_eq!(plan.appended.len(), 1);
    }

    #[test]
    fn substring_match_includes_longer_keys() {
        // `004_bar` は `004_bar_chart` の部分文字列
        let backlog = "| 004_bar_chart | 1 | READY |\n";
        let stories = [story(4, "bar", 1)];

        let substring = plan_append(
            backlog,
            &stories,
            DedupStrategy::Substring,
            &RowLayout::default(),
            "READY",
        );
        assert!(substring.is_empty());

        let row_keys = plan_append(
            backlog,
            &stories,
            DedupStrategy::RowKeys,
            &RowLayout::default(),
            "READY",
        );
        assert!(!row_keys.is_empty());
    }

    #[test]
    fn duplicate_keys_within_a_batch_are_appended_once() {
        let stories = [story(4, "bar", 1), story(4, "bar", 1)];
        let plan = plan_append(
            "",
            &stories,
            DedupStrategy::Substring,
            &RowLayout::default(),
            "READY",
        );
        assert_eq!(plan.appended.len(), 1);
        assert_eq!(plan.skipped.len(), 1);
    }

    #[test]
    fn applying_the_plan_twice_is_idempotent() {
        let stories = [story(4, "bar", 3), story(5, "baz", 5)];
        let layout = RowLayout::default();

        let first = plan_append(BACKLOG, &stories, DedupStrategy::Substring, &layout, "READY");
        let after_first = format!("{BACKLOG}{}", first.rows);

        let second = plan_append(&after_first, &stories, DedupStrategy::Substring, &layout, "READY");
        assert!(second.is_empty());
        assert_eq!(second.skipped.len(), 2);
    }

    #[rstest]
    #[case::substring(DedupStrategy::Substring)]
    #[case::row_keys(DedupStrategy::RowKeys)]
    fn unterminated_last_line_gets_a_newline_first(#[case] strategy: DedupStrategy) {
        let backlog = "| 003_foo | 2 | DONE |";
        let stories = [story(4, "bar", 3)];
        let layout = RowLayout::default();

        let first = plan_append(backlog, &stories, strategy, &layout, "READY");
        assert!(first.rows.starts_with("\n| 004_bar "));

        let after_first = format!("{backlog}{}", first.rows);
        let second = plan_append(&after_first, &stories, strategy, &layout, "READY");
        assert!(second.is_empty());
    }

    #[test]
    fn terminated_or_empty_document_gets_no_extra_newline() {
        let stories = [story(4, "bar", 3)];
        let layout = RowLayout::default();
        for backlog in ["", "| 003_foo | 2 | DONE |\n"] {
            let plan = plan_append(backlog, &stories, DedupStrategy::RowKeys, &layout, "READY");
            assert!(plan.rows.starts_with("| 004_bar "));
        }
    }

    #[test]
    fn row_key_parsing_skips_headers_and_separators() {
        let keys = existing_row_keys(BACKLOG);
        assert!(keys.contains("003_foo"));
        assert!(keys.contains("Story"));
        assert!(!keys.iter().any(|k| k.starts_with('-')));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn strategy_deserializes_from_snake_case() {
        let s: DedupStrategy = serde_json::from_str("\"row_keys\"").unwrap();
        assert_eq!(s, DedupStrategy::RowKeys);
        assert_eq!(DedupStrategy::default(), DedupStrategy::Substring);
    }
}
