// anchor/src/domain/repositories/repository.rs
use crate::domain::anchor::AnchorConfig;
use crate::domain::error::StoreResult;
use std::path::Path;

/// Whole-document persistence for the anchor store.
///
/// There is no partial update: callers load, modify in memory, and save the full document.
pub trait AnchorRepository: std::fmt::Debug + Send + Sync {
    /// Location of the backing document
    fn location(&self) -> &Path;

    /// Read the current document. A missing or empty backing file yields an empty document.
    fn load(&self) -> StoreResult<AnchorConfig>;

    /// Replace the stored document with `config`.
    fn save(&self, config: &AnchorConfig) -> StoreResult<()>;
}
