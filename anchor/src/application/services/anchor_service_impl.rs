// src/application/services/anchor_service_impl.rs
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::application::services::anchor_service::AnchorService;
use crate::domain::anchor::AnchorConfig;
use crate::domain::error::{StoreError, StoreResult};
use crate::domain::repositories::repository::AnchorRepository;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct AnchorServiceImpl<R: AnchorRepository> {
    repository: Arc<R>,
    // shadows the persisted default for the lifetime of this process
    session_override: RwLock<Option<String>>,
}

impl<R: AnchorRepository> AnchorServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            session_override: RwLock::new(None),
        }
    }

    /// Seed the session override, e.g. from the value a shell integration exported.
    /// Empty values count as unset.
    pub fn with_session_override(self, value: Option<String>) -> Self {
        Self {
            session_override: RwLock::new(value.filter(|v| !v.is_empty())),
            ..self
        }
    }

    pub fn session_override(&self) -> StoreResult<Option<String>> {
        self.session_override
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| StoreError::Session(e.to_string()))
    }

    fn set_session_override(&self, value: Option<String>) -> StoreResult<()> {
        let mut guard = self
            .session_override
            .write()
            .map_err(|e| StoreError::Session(e.to_string()))?;
        *guard = value;
        Ok(())
    }

    /// Load, apply `change`, save. Nothing is written if loading fails.
    fn modify<T, F>(&self, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut AnchorConfig) -> T,
    {
        let mut config = self.repository.load()?;
        let result = change(&mut config);
        self.repository.save(&config)?;
        Ok(result)
    }
}

impl<R: AnchorRepository> AnchorService for AnchorServiceImpl<R> {
    fn load(&self) -> StoreResult<AnchorConfig> {
        self.repository.load()
    }

    #[instrument(skip(self), level = "debug")]
    fn set_default(&self, path: &str) -> StoreResult<()> {
        self.modify(|config| config.set_default(path))?;
        self.set_session_override(Some(path.to_string()))
    }

    #[instrument(skip(self), level = "debug")]
    fn clear_default(&self) -> StoreResult<()> {
        self.modify(AnchorConfig::clear_default)?;
        self.set_session_override(None)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_default(&self) -> StoreResult<Option<String>> {
        if let Some(path) = self.session_override()? {
            debug!("Default taken from session override: {}", path);
            return Ok(Some(path));
        }
        Ok(self.repository.load()?.current_anchor)
    }

    #[instrument(skip(self), level = "debug")]
    fn save_bookmark(&self, name: &str, path: &str) -> StoreResult<()> {
        if let Some(previous) = self.modify(|config| config.save(name, path))? {
            debug!("Overwrote anchor '{}' (was {})", name, previous);
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn remove_bookmark(&self, name: &str) -> StoreResult<bool> {
        let removed = self.modify(|config| config.remove(name))?;
        if removed.is_none() {
            debug!("No anchor named '{}', nothing removed", name);
        }
        Ok(removed.is_some())
    }

    fn list_bookmarks(&self) -> StoreResult<BTreeMap<String, String>> {
        Ok(self.repository.load()?.saved_anchors)
    }

    #[instrument(skip(self), level = "trace")]
    fn get_bookmark_path(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.repository.load()?.path_of(name).map(str::to_string))
    }

    fn list_bookmark_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.repository.load()?.names())
    }
}
