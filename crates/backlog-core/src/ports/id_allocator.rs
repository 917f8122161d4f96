//! IdAllocator port - story ID 割り当ての抽象化
//!
//! IdAllocator はバッチの開始 ID を 1 回だけ返すインターフェースです。
//! 呼び出し元はそこからメモリ上で連番を進めます（レコードごとに再スキャンしない）。
//! trait にしてあるので、将来アトミックカウンタや永続カーソルに差し替えても
//! レンダリング側は変わりません。
//!
//! # 実装
//! - **DirectoryScanAllocator**: 出力ディレクトリのファイル名から最大 ID を求める（本番用）
//! - **FixedStartAllocator**: 決まった ID を返す（テスト用）

use std::path::PathBuf;

use crate::domain::{BacklogError, KEY_SEPARATOR, StoryId};

/// IdAllocator はバッチの開始 ID を返す
///
/// # 前提
/// - 同じ出力先に対して同時に動く writer は 1 つだけ
pub trait IdAllocator {
    /// 次に使える ID
    fn next_id(&self) -> Result<StoryId, BacklogError>;
}

/// DirectoryScanAllocator は出力ディレクトリをスキャンして次の ID を決める
///
/// # マッチ規則
/// - ファイル名が「ちょうど width 桁の数字 + `_`」で始まるものだけを数える
/// - それ以外（`notes.md`, `12_x.md`, `0004_x.md` など）は無視する（エラーにしない）
/// - ディレクトリが存在しなければ、既存ドキュメント 0 件として扱う
///
/// 外部から削除されたファイルの穴は埋めません（最大値 + 1 を返すだけ）。
#[derive(Debug, Clone)]
pub struct DirectoryScanAllocator {
    dir: PathBuf,
    width: usize,
}

impl DirectoryScanAllocator {
    pub fn new(dir: impl Into<PathBuf>, width: usize) -> Self {
        Self {
            dir: dir.into(),
            width,
        }
    }

    /// 既存ファイルの中で最大の連番（なければ None）
    pub fn highest_existing(&self) -> Result<Option<u32>, BacklogError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BacklogError::io(&self.dir, e)),
        };

        let mut highest: Option<u32> = None;
        for entry in entries {
            let entry = entry.map_err(|e| BacklogError::io(&self.dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(seq) = parse_sequence_prefix(name, self.width) {
                highest = Some(highest.map_or(seq, |h| h.max(seq)));
            }
        }
        Ok(highest)
    }
}

impl IdAllocator for DirectoryScanAllocator {
    fn next_id(&self) -> Result<StoryId, BacklogError> {
        let next = match self.highest_existing()? {
            Some(highest) => StoryId::new(highest, self.width)?.next()?,
            None => StoryId::first(self.width)?,
        };
        tracing::debug!(dir = %self.dir.display(), next_id = %next, "allocated starting story id");
        Ok(next)
    }
}

/// `004_bar.md` -> `Some(4)` (width = 3)
///
/// 先頭がちょうど `width` 桁の ASCII 数字で、その直後が区切り文字であること。
/// `000_x` のような 0 は有効な ID ではないので無視する。
pub fn parse_sequence_prefix(file_name: &str, width: usize) -> Option<u32> {
    let digits = file_name.get(..width)?;
    if width == 0 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !file_name[width..].starts_with(KEY_SEPARATOR) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|&seq| seq > 0)
}

/// FixedStartAllocator は常に同じ開始 ID を返す
///
/// 呼び出し元が自前でカウンタを持つ場合や、テストで使います。
#[derive(Debug, Clone, Copy)]
pub struct FixedStartAllocator {
    start: StoryId,
}

impl FixedStartAllocator {
    pub fn new(start: StoryId) -> Self {
        Self { start }
    }
}

impl IdAllocator for FixedStartAllocator {
    fn next_id(&self) -> Result<StoryId, BacklogError> {
        Ok(self.start)
    }
}
