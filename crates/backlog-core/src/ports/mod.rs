//! Ports - 抽象化レイヤー
//!
//! ジェネレータが外部（ファイルシステム）に触れる場所を trait として定義します。
//! 実装は `impls` にあります。
//!
//! - IdAllocator: 次の story ID を決める
//! - DocumentStore: story ドキュメントを新規作成する
//! - TrackingDocument: backlog を読んで追記する

pub mod document_store;
pub mod id_allocator;
pub mod tracking_document;

// 主要な trait を再エクスポート
pub use self::document_store::DocumentStore;
pub use self::id_allocator::{DirectoryScanAllocator, FixedStartAllocator, IdAllocator};
pub use self::tracking_document::TrackingDocument;
