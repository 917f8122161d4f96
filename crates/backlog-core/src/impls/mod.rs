//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FsDocumentStore / FsTrackingDocument**: ファイルシステム（本番用）
//! - **InMemoryDocumentStore / InMemoryTrackingDocument**: テスト用
//!
//! `DirectoryScanAllocator` は port と同じファイル（`ports::id_allocator`）にあります。

pub mod fs;
pub mod inmem;

// 主要な型を再エクスポート
pub use self::fs::{FsDocumentStore, FsTrackingDocument};
pub use self::inmem::{InMemoryDocumentStore, InMemoryTrackingDocument};
