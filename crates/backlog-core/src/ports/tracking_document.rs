//! TrackingDocument port - backlog（追跡ドキュメント）の読み書き
//!
//! backlog は 1 ストーリー 1 行の共有テキストファイルです。
//! このシステムは全体を読むことと末尾に追記することしかしません。
//!
//! # 実装
//! - **FsTrackingDocument**: ファイル（本番用）
//! - **InMemoryTrackingDocument**: テスト用

use crate::domain::BacklogError;

/// TrackingDocument は backlog の読み取りと追記を提供
pub trait TrackingDocument {
    /// 現在の内容をすべて読む。存在しなければ `BacklogError::TrackingNotFound`
    fn read(&self) -> Result<String, BacklogError>;

    /// `rows` を末尾に 1 回の書き込みで追記する
    fn append(&mut self, rows: &str) -> Result<(), BacklogError>;
}
