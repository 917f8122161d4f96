//! Errors - エラー型と分類
//!
//! すべてのエラーは呼び出し元まで伝播し、握りつぶしません。
//! リトライもしません（原因を直してから再実行するのは呼び出し元の責務）。

use std::path::PathBuf;

use thiserror::Error;

use super::validate::RecordViolation;

/// ErrorKind はエラーの運用上の分類
///
/// - Configuration: パス・設定の問題（ディレクトリや backlog が読めない、ID 幅が足りない）
/// - Collision: 書き込み先のドキュメントが既に存在する
/// - InvalidRecord: 入力レコードの必須項目が欠けている
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Collision,
    InvalidRecord,
}

/// BacklogError は story 生成のドメインエラー
#[derive(Debug, Error)]
pub enum BacklogError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "tracking document not found: {} ({documents_written} story documents were already written)",
        .path.display()
    )]
    TrackingNotFound {
        path: PathBuf,
        documents_written: usize,
    },

    #[error("story document already exists: {}", .path.display())]
    Collision { path: PathBuf },

    #[error("story id space exhausted: the next id does not fit into {width} digits")]
    IdSpaceExhausted { width: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} invalid story record(s): {}", .0.len(), join_violations(.0))]
    InvalidRecords(Vec<RecordViolation>),
}

impl BacklogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. }
            | Self::TrackingNotFound { .. }
            | Self::IdSpaceExhausted { .. }
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::Collision { .. } => ErrorKind::Collision,
            Self::InvalidRecords(_) => ErrorKind::InvalidRecord,
        }
    }

    /// TrackingNotFound に書き込み済みドキュメント数を記録する。他の variant はそのまま
    pub(crate) fn with_documents_written(self, written: usize) -> Self {
        match self {
            Self::TrackingNotFound { path, .. } => Self::TrackingNotFound {
                path,
                documents_written: written,
            },
            other => other,
        }
    }
}

fn join_violations(violations: &[RecordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
