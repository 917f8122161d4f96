//! Story identifiers (fixed-width sequence numbers).
//!
//! # ゼロ埋め固定幅の連番
//! `StoryId` は `003` のようにゼロ埋めされた連番です。
//! 幅（width）を値と一緒に保持するので、Display は常に同じ幅で出力されます。
//!
//! ## 制約
//! - 最小値は 1
//! - 幅に収まらない値は作れない（次回のディレクトリスキャンで認識できなくなり、
//!   ID が再利用されてしまうため）
//!
//! `StoryKey` は `{id}_{name}` で、ファイル名の stem と backlog 行のキーを兼ねます。

use std::fmt;

use serde::{Serialize, Serializer};

use super::errors::BacklogError;

/// Default number of digits in a story id (`001`, `002`, ...).
pub const DEFAULT_ID_WIDTH: usize = 3;

/// Upper bound for the width so every id fits into a `u32`.
pub const MAX_ID_WIDTH: usize = 9;

/// Separator between the id and the slug in a story key.
pub const KEY_SEPARATOR: char = '_';

/// Zero-padded, fixed-width story sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryId {
    value: u32,
    width: usize,
}

impl StoryId {
    /// 最初の ID（`1` を width 桁でゼロ埋め）
    pub fn first(width: usize) -> Result<Self, BacklogError> {
        Self::new(1, width)
    }

    /// 値と幅から StoryId を作成
    ///
    /// - width は 1..=MAX_ID_WIDTH
    /// - value は 1 以上、かつ width 桁に収まること
    pub fn new(value: u32, width: usize) -> Result<Self, BacklogError> {
        validate_width(width)?;
        if value == 0 {
            return Err(BacklogError::InvalidConfig(
                "story ids start at 1".to_string(),
            ));
        }
        if value > Self::max_for_width(width) {
            return Err(BacklogError::IdSpaceExhausted { width });
        }
        Ok(Self { value, width })
    }

    /// 次の ID（同じ幅）。幅に収まらなければ IdSpaceExhausted
    pub fn next(self) -> Result<Self, BacklogError> {
        let value = self
            .value
            .checked_add(1)
            .ok_or(BacklogError::IdSpaceExhausted { width: self.width })?;
        Self::new(value, self.width)
    }

    /// Largest value representable with `width` digits.
    pub fn max_for_width(width: usize) -> u32 {
        // width <= MAX_ID_WIDTH なので 10^9 - 1 でも u32 に収まる
        10u32.saturating_pow(width as u32).saturating_sub(1)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}

impl Serialize for StoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub(crate) fn validate_width(width: usize) -> Result<(), BacklogError> {
    if width == 0 || width > MAX_ID_WIDTH {
        return Err(BacklogError::InvalidConfig(format!(
            "id width must be between 1 and {MAX_ID_WIDTH}, got {width}"
        )));
    }
    Ok(())
}

/// `{id}_{name}`: the filename stem of a story document and its backlog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryKey {
    id: StoryId,
    name: String,
}

impl StoryKey {
    pub fn new(id: StoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document file name: `{id}_{name}.{extension}`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{self}.{extension}")
    }
}

impl fmt::Display for StoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, KEY_SEPARATOR, self.name)
    }
}

impl Serialize for StoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
