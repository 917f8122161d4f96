//! DocumentStore port - story ドキュメントの書き込み先
//!
//! # 実装
//! - **FsDocumentStore**: 出力ディレクトリにファイルを新規作成（本番用）
//! - **InMemoryDocumentStore**: テスト用

use std::path::PathBuf;

use crate::domain::BacklogError;

/// DocumentStore は story ドキュメントを新規作成する
///
/// # 設計原則
/// - 既存のドキュメントは絶対に上書きしない（`BacklogError::Collision` を返す）
/// - 書き込んだ場所を返す（レポート用）
pub trait DocumentStore {
    fn create(&mut self, file_name: &str, body: &str) -> Result<PathBuf, BacklogError>;
}
