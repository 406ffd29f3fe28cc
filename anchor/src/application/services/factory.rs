// src/application/services/factory.rs
use std::sync::Arc;

use crate::application::services::anchor_service::AnchorService;
use crate::application::AnchorServiceImpl;
use crate::config::{session_override_from_env, Settings};
use crate::domain::repositories::repository::AnchorRepository;
use crate::infrastructure::repositories::json_file_repository::JsonFileRepository;
use tracing::debug;

pub fn create_anchor_repository(settings: &Settings) -> Arc<JsonFileRepository> {
    Arc::new(JsonFileRepository::new(settings.resolved_store_path()))
}

/// Creates an anchor service on the configured store, seeded with the session value
/// exported by the shell (if any)
pub fn create_anchor_service(settings: &Settings) -> Arc<dyn AnchorService> {
    let repository = create_anchor_repository(settings);
    debug!("Anchor store: {}", repository.location().display());
    Arc::new(AnchorServiceImpl::new(repository).with_session_override(session_override_from_env()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FzfOpts, SESSION_ENV};
    use crate::util::testing::{temp_store, EnvGuard};
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn given_session_env_when_create_service_then_override_applies() {
        let _guard = EnvGuard::new();
        let (_dir, path) = temp_store();
        let settings = Settings {
            store_path: path.to_string_lossy().into_owned(),
            fzf_opts: FzfOpts::default(),
        };
        env::set_var(SESSION_ENV, "/from/shell");

        let service = create_anchor_service(&settings);

        assert_eq!(service.get_default().unwrap(), Some("/from/shell".to_string()));
        assert!(!path.exists());
    }

    #[test]
    #[serial]
    fn given_settings_when_create_repository_then_uses_store_path() {
        let _guard = EnvGuard::new();
        let (_dir, path) = temp_store();
        let settings = Settings {
            store_path: path.to_string_lossy().into_owned(),
            fzf_opts: FzfOpts::default(),
        };

        let repository = create_anchor_repository(&settings);

        assert_eq!(repository.location(), path.as_path());
    }
}
