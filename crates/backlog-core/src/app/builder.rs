//! GeneratorBuilder - 設定からファイルシステム版ジェネレータを組み立てる
//!
//! # Fail-fast 設計
//! - build() 時に設定を検証し、不正なら何も触らずに InvalidConfig を返す

use super::backlog::DedupStrategy;
use super::generator::DocumentGenerator;
use crate::config::GeneratorConfig;
use crate::domain::BacklogError;
use crate::impls::{FsDocumentStore, FsTrackingDocument};
use crate::ports::DirectoryScanAllocator;

/// Generator wired to the filesystem.
pub type FsDocumentGenerator =
    DocumentGenerator<DirectoryScanAllocator, FsDocumentStore, FsTrackingDocument>;

/// GeneratorBuilder は GeneratorConfig から FsDocumentGenerator を構築
///
/// # 使用例
/// ```ignore
/// let mut generator = GeneratorBuilder::new(config)
///     .dedup(DedupStrategy::RowKeys)
///     .build()?;
/// let report = generator.generate(records)?;
/// ```
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// 重複判定の方法を上書き
    pub fn dedup(mut self, dedup: DedupStrategy) -> Self {
        self.config.dedup = dedup;
        self
    }

    /// ステータスラベルを上書き
    pub fn status_label(mut self, label: impl Into<String>) -> Self {
        self.config.status_label = label.into();
        self
    }

    /// 出力ディレクトリ用の IdAllocator だけを構築（`next-id` 用）
    pub fn build_allocator(&self) -> Result<DirectoryScanAllocator, BacklogError> {
        self.config.validate()?;
        Ok(DirectoryScanAllocator::new(
            &self.config.stories_dir,
            self.config.id_width,
        ))
    }

    /// 設定を検証してジェネレータを構築
    pub fn build(self) -> Result<FsDocumentGenerator, BacklogError> {
        let allocator = self.build_allocator()?;
        Ok(DocumentGenerator::new(
            allocator,
            FsDocumentStore::new(&self.config.stories_dir),
            FsTrackingDocument::new(&self.config.backlog_path),
            self.config.settings(),
        ))
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
