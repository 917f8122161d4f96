//! Domain model (story ids, records, validation, errors).
//!
//! - ids: StoryId（ゼロ埋め固定幅の連番）と StoryKey（`{id}_{name}`）
//! - story: StoryRecord（呼び出し元が作る入力）と AssignedStory（ID 割り当て後）
//! - validate: 書き込み前のバッチ検証
//! - errors: BacklogError と ErrorKind

pub mod errors;
pub mod ids;
pub mod story;
pub mod validate;

pub use self::errors::{BacklogError, ErrorKind};
pub use self::ids::{DEFAULT_ID_WIDTH, KEY_SEPARATOR, MAX_ID_WIDTH, StoryId, StoryKey};
pub use self::story::{AssignedStory, StoryRecord, StoryType, UserStory};
pub use self::validate::{RecordViolation, Violation, is_slug, validate_batch, validate_record};
