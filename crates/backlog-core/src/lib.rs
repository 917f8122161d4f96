//! backlog-core
//!
//! Story ドキュメント生成と backlog 追記のコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（StoryId, StoryKey, StoryRecord, 検証, エラー）
//! - **ports**: 抽象化レイヤー（IdAllocator, DocumentStore, TrackingDocument）
//! - **impls**: 実装（ファイルシステム版、インメモリ版）
//! - **render**: 純粋なテンプレート処理（ドキュメント本文、backlog 行）
//! - **app**: アプリケーションロジック（DocumentGenerator, 冪等追記, builder）
//! - **config**: GeneratorConfig

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod render;

pub use app::{DocumentGenerator, GenerationReport, GeneratorBuilder};
pub use config::GeneratorConfig;
pub use domain::{BacklogError, ErrorKind, StoryRecord};
