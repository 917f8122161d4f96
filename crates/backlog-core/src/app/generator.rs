//! DocumentGenerator - story ドキュメントの生成と backlog への追記
//!
//! # 実行フロー（2 フェーズ）
//! 1. 検証: バッチ全体を検証（不正があれば何も書かない）
//! 2. 割り当て: IdAllocator から開始 ID を 1 回だけ取得し、入力順に連番を振る
//! 3. 書き込みフェーズ: 1 レコード 1 ファイル（既存ファイルは上書きせず Collision）
//! 4. 追記フェーズ: backlog を 1 回読み、載っていない行だけを 1 回の書き込みで追記
//!
//! 2 つのフェーズはトランザクションではありません。追記フェーズが失敗しても、
//! 書き込み済みのドキュメントはそのまま残ります。
//! 再実行は安全です（ディレクトリスキャンが次の開始 ID を決め直すため）。

use tracing::{debug, info, info_span, warn};

use super::backlog::{DedupStrategy, plan_append};
use super::status::{GenerationPlan, GenerationReport, PlannedDocument, TrackingUpdate};
use crate::domain::{AssignedStory, BacklogError, StoryRecord, validate_batch};
use crate::ports::{DocumentStore, IdAllocator, TrackingDocument};
use crate::render::{DEFAULT_STATUS_LABEL, RowLayout, render_document};

/// Rendering and dedup knobs of a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Document file extension without the dot.
    pub extension: String,
    pub status_label: String,
    pub row_layout: RowLayout,
    pub dedup: DedupStrategy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            status_label: DEFAULT_STATUS_LABEL.to_string(),
            row_layout: RowLayout::default(),
            dedup: DedupStrategy::default(),
        }
    }
}

/// Turns story records into documents and backlog rows.
///
/// Single writer only: two generators running against the same directory at
/// the same time can compute the same starting id. The second one then fails
/// with `BacklogError::Collision` instead of overwriting.
pub struct DocumentGenerator<A, D, T> {
    allocator: A,
    documents: D,
    tracking: T,
    settings: GeneratorSettings,
}

impl<A, D, T> DocumentGenerator<A, D, T>
where
    A: IdAllocator,
    D: DocumentStore,
    T: TrackingDocument,
{
    pub fn new(allocator: A, documents: D, tracking: T, settings: GeneratorSettings) -> Self {
        Self {
            allocator,
            documents,
            tracking,
            settings,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    /// Validates, assigns ids and renders without writing anything.
    ///
    /// An empty batch yields an empty plan without consulting the allocator.
    pub fn plan(&self, records: Vec<StoryRecord>) -> Result<GenerationPlan, BacklogError> {
        if records.is_empty() {
            return Ok(GenerationPlan::default());
        }
        validate_batch(&records)?;

        let mut next = self.allocator.next_id()?;
        let last = records.len() - 1;
        let mut documents = Vec::with_capacity(records.len());

        for (i, record) in records.into_iter().enumerate() {
            let story = AssignedStory::new(next, record);
            let file_name = story.key().file_name(&self.settings.extension);
            let body = render_document(&story, &self.settings.status_label);
            documents.push(PlannedDocument {
                story,
                file_name,
                body,
            });
            if i < last {
                // バッチが幅に収まらなければ、何も書く前にここで失敗する
                next = next.next()?;
            }
        }

        Ok(GenerationPlan { documents })
    }

    /// Runs the whole batch: write every document, then append new backlog rows.
    ///
    /// Returns how many documents were written and whether the backlog changed.
    pub fn generate(&mut self, records: Vec<StoryRecord>) -> Result<GenerationReport, BacklogError> {
        let span = info_span!("generate", records = records.len());
        let _enter = span.enter();

        if records.is_empty() {
            info!("no story records supplied; nothing to do");
            return Ok(GenerationReport::empty());
        }

        let plan = self.plan(records)?;

        let mut written = Vec::with_capacity(plan.len());
        for doc in &plan.documents {
            let path = self.documents.create(&doc.file_name, &doc.body)?;
            debug!(key = %doc.story.key(), path = %path.display(), "story document written");
            written.push(path);
        }

        let update = self
            .append_tracking(&plan.stories())
            .map_err(|e| e.with_documents_written(written.len()))?;

        info!(
            generated = written.len(),
            appended = update.appended_keys.len(),
            skipped = update.skipped_keys.len(),
            "story generation finished"
        );

        Ok(GenerationReport {
            generated: written.len(),
            tracking_updated: update.updated,
            documents: written,
            appended_keys: update.appended_keys,
            skipped_keys: update.skipped_keys,
        })
    }

    /// Read-check-append phase on its own.
    ///
    /// Reads the backlog once and appends the missing rows in a single write.
    /// Nothing is written when every story is already represented, so calling
    /// this twice with the same stories leaves the backlog as after the first call.
    pub fn append_tracking(
        &mut self,
        stories: &[AssignedStory],
    ) -> Result<TrackingUpdate, BacklogError> {
        if stories.is_empty() {
            return Ok(TrackingUpdate::default());
        }

        let existing = self.tracking.read()?;
        let plan = plan_append(
            &existing,
            stories,
            self.settings.dedup,
            &self.settings.row_layout,
            &self.settings.status_label,
        );

        for key in &plan.skipped {
            warn!(key = %key, "backlog already mentions story; row not appended");
        }

        if plan.is_empty() {
            return Ok(TrackingUpdate {
                updated: false,
                appended_keys: plan.appended,
                skipped_keys: plan.skipped,
            });
        }

        self.tracking.append(&plan.rows)?;
        Ok(TrackingUpdate {
            updated: true,
            appended_keys: plan.appended,
            skipped_keys: plan.skipped,
        })
    }
}
