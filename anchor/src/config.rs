// anchor/src/config.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Overrides the location of the anchor store
pub const STORE_ENV: &str = "ANCHOR_STORE";
/// Picker options, e.g. "--height 80% --reverse --no-preview"
pub const FZF_OPTS_ENV: &str = "ANCHOR_FZF_OPTS";
/// Session value of the default anchor; wins over the persisted one for `get` and `go`
pub const SESSION_ENV: &str = "ANCHOR";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FzfOpts {
    /// Height of the picker window (default: "50%")
    #[serde(default = "default_height")]
    pub height: String,

    /// Whether to list from the top instead of the bottom (default: false)
    #[serde(default)]
    pub reverse: bool,

    /// Whether to show the directory preview pane (default: true)
    #[serde(default = "default_preview")]
    pub preview: bool,
}

fn default_height() -> String {
    "50%".to_string()
}

fn default_preview() -> bool {
    true
}

impl Default for FzfOpts {
    fn default() -> Self {
        Self {
            height: default_height(),
            reverse: false,
            preview: default_preview(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the JSON anchor store, `~` and `$VARS` are expanded
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Options for the interactive picker
    #[serde(default)]
    pub fzf_opts: FzfOpts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            fzf_opts: FzfOpts::default(),
        }
    }
}

impl Settings {
    /// The store location with `~` and environment variables expanded.
    pub fn resolved_store_path(&self) -> PathBuf {
        let expanded = shellexpand::full(&self.store_path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(&self.store_path).into_owned());
        PathBuf::from(expanded)
    }

    /// Applies `ANCHOR_STORE` and `ANCHOR_FZF_OPTS`, which beat the settings file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(store) = std::env::var(STORE_ENV) {
            if !store.is_empty() {
                trace!("Using {} from environment: {}", STORE_ENV, store);
                self.store_path = store;
            }
        }

        if let Ok(fzf_opts) = std::env::var(FZF_OPTS_ENV) {
            trace!("Using {} from environment: {}", FZF_OPTS_ENV, fzf_opts);
            self.fzf_opts = parse_fzf_opts(&fzf_opts);
        }
        self
    }

    /// Applies a `--store` flag, which beats every other source.
    pub fn with_store_override(mut self, store: Option<&Path>) -> Self {
        if let Some(store) = store {
            debug!("Using anchor store from command line: {}", store.display());
            self.store_path = store.to_string_lossy().into_owned();
        }
        self
    }
}

/// `~/.config/anchor`
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("anchor")
}

fn default_store_path() -> String {
    config_dir()
        .join("config.json")
        .to_string_lossy()
        .into_owned()
}

pub fn default_settings_file() -> PathBuf {
    config_dir().join("settings.toml")
}

// Parse picker options from a string like "--height 80% --reverse --no-preview"
fn parse_fzf_opts(opts_str: &str) -> FzfOpts {
    let mut opts = FzfOpts::default();
    let parts: Vec<&str> = opts_str.split_whitespace().collect();

    for i in 0..parts.len() {
        match parts[i] {
            "--height" if i + 1 < parts.len() => {
                opts.height = parts[i + 1].to_string();
            }
            "--reverse" => {
                opts.reverse = true;
            }
            "--no-preview" => {
                opts.preview = false;
            }
            _ => {} // unknown options are ignored
        }
    }

    opts
}

fn read_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<Settings>(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings: defaults, then the settings file, then environment variables.
///
/// An explicitly given `config_file` must exist; the default settings file is optional.
/// Callers falling back to defaults on error should still apply [`Settings::with_env_overrides`].
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> Result<Settings, SettingsError> {
    trace!("Loading settings");

    let settings = match config_file {
        Some(path) => read_settings_file(path)?,
        None => {
            let path = default_settings_file();
            if path.exists() {
                trace!("Loading settings from: {:?}", path);
                read_settings_file(&path)?
            } else {
                Settings::default()
            }
        }
    };

    let settings = settings.with_env_overrides();
    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

/// Session value of the default anchor exported by the shell, if any.
pub fn session_override_from_env() -> Option<String> {
    std::env::var(SESSION_ENV).ok().filter(|v| !v.is_empty())
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
