// src/application/services/anchor_service.rs
use crate::domain::anchor::AnchorConfig;
use crate::domain::error::StoreResult;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Service interface for anchor operations
///
/// Every query reads the store fresh and every mutation is a full load-modify-save cycle.
/// Absence (unknown name, no default) is `None`, never an error.
pub trait AnchorService: Send + Sync + Debug {
    /// Read the whole document
    fn load(&self) -> StoreResult<AnchorConfig>;

    /// Make `path` the default anchor and remember it for the rest of this session
    fn set_default(&self, path: &str) -> StoreResult<()>;

    /// Unset the default anchor and the session override
    fn clear_default(&self) -> StoreResult<()>;

    /// Session override if one is set, otherwise the persisted default
    fn get_default(&self) -> StoreResult<Option<String>>;

    /// Insert or overwrite a bookmark
    fn save_bookmark(&self, name: &str, path: &str) -> StoreResult<()>;

    /// Delete a bookmark; returns false when there was nothing to delete
    fn remove_bookmark(&self, name: &str) -> StoreResult<bool>;

    fn list_bookmarks(&self) -> StoreResult<BTreeMap<String, String>>;

    fn get_bookmark_path(&self, name: &str) -> StoreResult<Option<String>>;

    /// Bookmark names, sorted
    fn list_bookmark_names(&self) -> StoreResult<Vec<String>>;
}
