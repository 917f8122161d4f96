//! Render - 純粋なテンプレート処理
//!
//! 同じ入力からは常にバイト単位で同じ出力を返します（I/O なし）。
//!
//! - document: story ドキュメント本文（markdown）
//! - row: backlog の 1 行

pub mod document;
pub mod row;

pub use self::document::{DEFAULT_STATUS_LABEL, render_document, render_user_story};
pub use self::row::{RowLayout, render_row};
