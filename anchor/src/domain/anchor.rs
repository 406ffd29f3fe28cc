// anchor/src/domain/anchor.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The persisted anchor document.
///
/// `current_anchor` is the default directory the shell wrapper jumps to. It is independent
/// of `saved_anchors`: it may point anywhere, and removing a bookmark never clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorConfig {
    #[serde(default)]
    pub current_anchor: Option<String>,

    #[serde(default)]
    pub saved_anchors: BTreeMap<String, String>,
}

impl AnchorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default(&mut self, path: &str) {
        self.current_anchor = Some(path.to_string());
    }

    pub fn clear_default(&mut self) {
        self.current_anchor = None;
    }

    /// Inserts or overwrites `name`. Returns the previous path, if any.
    pub fn save(&mut self, name: &str, path: &str) -> Option<String> {
        self.saved_anchors.insert(name.to_string(), path.to_string())
    }

    /// Removes `name`. Returns the removed path; `None` when it was not there.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.saved_anchors.remove(name)
    }

    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.saved_anchors.get(name).map(String::as_str)
    }

    /// Names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.saved_anchors.keys().cloned().collect()
    }
}
