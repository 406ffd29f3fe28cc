// src/util/testing.rs

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{FZF_OPTS_ENV, SESSION_ENV, STORE_ENV};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// Name of the store file inside a test's temp directory
    pub store_file: &'static str,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and returns it.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            store_file: "config.json",
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["skim", "tuikit"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Temp directory with a store path inside it; the directory lives as long as the value.
pub fn temp_store() -> (TempDir, PathBuf) {
    let env_data = init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(env_data.store_file);
    (dir, path)
}

/// Restores the anchor environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    store: Option<String>,
    fzf_opts: Option<String>,
    session: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            store: env::var(STORE_ENV).ok(),
            fzf_opts: env::var(FZF_OPTS_ENV).ok(),
            session: env::var(SESSION_ENV).ok(),
        }
    }
}

fn restore(key: &str, value: &Option<String>) {
    match value {
        Some(val) => env::set_var(key, val),
        None => env::remove_var(key),
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        restore(STORE_ENV, &self.store);
        restore(FZF_OPTS_ENV, &self.fzf_opts);
        restore(SESSION_ENV, &self.session);
    }
}
