//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **DocumentGenerator**: 検証 → ID 割り当て → ドキュメント書き込み → backlog 追記
//! - **backlog**: 冪等な追記の計画（重複判定）
//! - **GeneratorBuilder**: 設定からファイルシステム版を構築
//! - **status**: 実行結果のレポート

pub mod backlog;
pub mod builder;
pub mod generator;
pub mod status;

// 主要な型を再エクスポート
pub use self::backlog::{AppendPlan, DedupStrategy, existing_row_keys, plan_append};
pub use self::builder::{FsDocumentGenerator, GeneratorBuilder};
pub use self::generator::{DocumentGenerator, GeneratorSettings};
pub use self::status::{GenerationPlan, GenerationReport, PlannedDocument, TrackingUpdate};
