// anchor/src/infrastructure/repositories/json_file_repository.rs
use crate::domain::anchor::AnchorConfig;
use crate::domain::error::{StoreError, StoreResult};
use crate::domain::repositories::repository::AnchorRepository;
use serde::de::Error as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, trace};

/// Mode for a store file created from scratch
#[cfg(unix)]
const NEW_STORE_MODE: u32 = 0o644;

/// Anchor store backed by a single JSON file.
///
/// Reads are plain whole-file reads. Writes go to a temporary file next to the real store
/// which is then renamed over it, so a crash mid-write leaves the old document intact.
/// A symlinked store is written through to its target, keeping the link and the target's
/// permissions. Concurrent writers are not coordinated: the last rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn read_contents(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            source,
        }
    }

    /// The file a save replaces: symlinks resolved, or the configured path if nothing is there yet.
    fn write_target(&self) -> StoreResult<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(self.write_error(e)),
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Permissions the written file should end up with.
    fn target_permissions(&self, target: &Path) -> StoreResult<Option<fs::Permissions>> {
        match fs::metadata(target) {
            Ok(metadata) => Ok(Some(metadata.permissions())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(new_store_permissions()),
            Err(e) => Err(self.write_error(e)),
        }
    }
}

#[cfg(unix)]
fn new_store_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(NEW_STORE_MODE))
}

#[cfg(not(unix))]
fn new_store_permissions() -> Option<fs::Permissions> {
    None
}

/// Directory holding `path`; a bare file name lives in the working directory.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl AnchorRepository for JsonFileRepository {
    fn location(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), level = "debug", fields(path = %self.path.display()))]
    fn load(&self) -> StoreResult<AnchorConfig> {
        let Some(contents) = self.read_contents()? else {
            debug!("Anchor store does not exist yet, using empty document");
            return Ok(AnchorConfig::default());
        };

        if contents.trim().is_empty() {
            debug!("Anchor store is empty, using empty document");
            return Ok(AnchorConfig::default());
        }

        // serde accepts a struct in sequence form too; the document must be an object
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| self.parse_error(e))?;
        if !value.is_object() {
            return Err(self.parse_error(serde_json::Error::custom(
                "expected a JSON object at the top level",
            )));
        }
        let config: AnchorConfig =
            serde_json::from_value(value).map_err(|e| self.parse_error(e))?;
        trace!("Loaded {} saved anchors", config.saved_anchors.len());
        Ok(config)
    }

    #[instrument(skip(self, config), level = "debug", fields(path = %self.path.display()))]
    fn save(&self, config: &AnchorConfig) -> StoreResult<()> {
        let target = self.write_target()?;
        let dir = parent_dir(&target);
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');

        let permissions = self.target_permissions(&target)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.write_error(e))?;
        if let Some(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| self.write_error(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(&target)
            .map_err(|e| self.write_error(e.error))?;

        debug!(
            "Saved {} anchors to {} (default: {:?})",
            config.saved_anchors.len(),
            target.display(),
            config.current_anchor
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::init_test_env;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn repository_in(dir: &TempDir) -> JsonFileRepository {
        JsonFileRepository::new(dir.path().join("anchor").join("config.json"))
    }

    #[test]
    fn given_missing_file_when_load_then_empty_config() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let repo = repository_in(&dir);

        let config = repo.load().unwrap();

        assert_eq!(config, AnchorConfig::default());
        assert!(!repo.location().exists());
    }

    #[test]
    fn given_blank_file_when_load_then_empty_config() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "  \n").unwrap();

        let config = JsonFileRepository::new(&path).load().unwrap();

        assert_eq!(config, AnchorConfig::default());
    }

    #[test]
    fn given_corrupt_file_when_load_then_parse_error() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\"saved_anchors\": {\"x\": ").unwrap();

        let result = JsonFileRepository::new(&path).load();

        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn given_directory_as_store_when_load_then_read_error() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();

        let result = JsonFileRepository::new(dir.path()).load();

        assert!(matches!(result, Err(StoreError::Read { .. })));
    }

    #[test]
    fn given_missing_parent_when_save_then_creates_directory_and_file() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let repo = repository_in(&dir);
        let mut config = AnchorConfig::new();
        config.save("proj", "/home/u/proj");
        config.set_default("/tmp/proj");

        repo.save(&config).unwrap();

        assert!(repo.location().exists());
        assert_eq!(repo.load().unwrap(), config);
    }

    #[test]
    fn given_save_when_written_then_schema_field_names_used() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let repo = repository_in(&dir);
        let mut config = AnchorConfig::new();
        config.save("proj", "/home/u/proj");

        repo.save(&config).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.location()).unwrap()).unwrap();
        assert!(raw["current_anchor"].is_null());
        assert_eq!(raw["saved_anchors"]["proj"], "/home/u/proj");
    }

    #[test]
    fn given_save_when_done_then_no_temporary_files_left() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let repo = repository_in(&dir);

        repo.save(&AnchorConfig::new()).unwrap();
        repo.save(&AnchorConfig::new()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path().join("anchor"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
    }

    #[test]
    fn given_existing_document_when_save_then_replaced_whole() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let repo = repository_in(&dir);
        let mut first = AnchorConfig::new();
        first.save("a", "/a");
        first.save("b", "/b");
        repo.save(&first).unwrap();

        let second = AnchorConfig {
            current_anchor: None,
            saved_anchors: BTreeMap::from([("c".to_string(), "/c".to_string())]),
        };
        repo.save(&second).unwrap();

        assert_eq!(repo.load().unwrap(), second);
    }

    #[test]
    fn given_parent_is_a_file_when_save_then_create_dir_error() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let repo = JsonFileRepository::new(blocker.join("config.json"));

        let result = repo.save(&AnchorConfig::new());

        assert!(matches!(result, Err(StoreError::CreateDir { .. })));
    }

    #[test]
    fn given_top_level_array_when_load_then_parse_error() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        for contents in ["[]", r#"["/x", {"p": "/p"}]"#] {
            fs::write(&path, contents).unwrap();

            let result = JsonFileRepository::new(&path).load();

            assert!(
                matches!(result, Err(StoreError::Parse { .. })),
                "{} loaded as {:?}",
                contents,
                result
            );
        }
    }

    #[test]
    fn given_store_path_is_directory_when_save_then_write_error_and_no_temp_file() {
        let _ = init_test_env();
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("config.json");
        fs::create_dir(&store).unwrap();
        fs::write(store.join("keep"), "x").unwrap();

        let result = JsonFileRepository::new(&store).save(&AnchorConfig::new());

        assert!(matches!(result, Err(StoreError::Write { .. })));
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
        assert_eq!(fs::read_to_string(store.join("keep")).unwrap(), "x");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::{symlink, PermissionsExt};

        fn mode_of(path: &Path) -> u32 {
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        #[test]
        fn given_read_only_directory_when_save_then_previous_file_intact() {
            let _ = init_test_env();
            let dir = tempfile::tempdir().unwrap();
            let store_dir = dir.path().join("anchor");
            let repo = JsonFileRepository::new(store_dir.join("config.json"));
            let mut config = AnchorConfig::new();
            config.save("proj", "/home/u/proj");
            repo.save(&config).unwrap();
            let before = fs::read(repo.location()).unwrap();

            fs::set_permissions(&store_dir, fs::Permissions::from_mode(0o555)).unwrap();
            // root ignores directory permissions, nothing to check then
            let writable = fs::write(store_dir.join(".writable"), "").is_ok();
            let result = if writable {
                None
            } else {
                let mut changed = config.clone();
                changed.save("web", "/srv/web");
                Some(repo.save(&changed))
            };
            fs::set_permissions(&store_dir, fs::Permissions::from_mode(0o755)).unwrap();
            let Some(result) = result else {
                return;
            };

            assert!(matches!(
                result,
                Err(StoreError::Write { .. }) | Err(StoreError::CreateDir { .. })
            ));
            assert_eq!(fs::read(repo.location()).unwrap(), before);
            let entries: Vec<_> = fs::read_dir(&store_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name())
                .collect();
            assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
        }

        #[test]
        fn given_existing_file_mode_when_save_then_mode_kept() {
            let _ = init_test_env();
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, "{}").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

            JsonFileRepository::new(&path)
                .save(&AnchorConfig::new())
                .unwrap();

            assert_eq!(mode_of(&path), 0o640);
        }

        #[test]
        fn given_new_store_when_save_then_world_readable_mode() {
            let _ = init_test_env();
            let dir = tempfile::tempdir().unwrap();
            let repo = repository_in(&dir);

            repo.save(&AnchorConfig::new()).unwrap();

            assert_eq!(mode_of(repo.location()), NEW_STORE_MODE);
        }

        #[test]
        fn given_symlinked_store_when_save_then_target_updated_and_link_kept() {
            let _ = init_test_env();
            let dir = tempfile::tempdir().unwrap();
            let dotfiles = dir.path().join("dotfiles");
            fs::create_dir(&dotfiles).unwrap();
            let real = dotfiles.join("anchors.json");
            fs::write(&real, "{}").unwrap();
            let link = dir.path().join("config.json");
            symlink(&real, &link).unwrap();
            let repo = JsonFileRepository::new(&link);
            let mut config = AnchorConfig::new();
            config.save("proj", "/home/u/proj");

            repo.save(&config).unwrap();

            assert!(fs::symlink_metadata(&link)
                .unwrap()
                .file_type()
                .is_symlink());
            assert_eq!(
                JsonFileRepository::new(&real).load().unwrap(),
                config
            );
            assert_eq!(repo.load().unwrap(), config);
        }
    }
}
