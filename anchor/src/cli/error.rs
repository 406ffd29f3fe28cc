// src/cli/error.rs
use crate::domain::error::StoreError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No saved anchor named '{0}'")]
    UnknownAnchor(String),

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl From<StoreError> for CliError {
    fn from(source: StoreError) -> Self {
        CliError::Store {
            context: "Storage error".to_string(),
            source,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        CliError::Io {
            context: "IO error".to_string(),
            source,
        }
    }
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Store { source, .. } => CliError::Store {
                context: context.into(),
                source,
            },
            CliError::Io { source, .. } => CliError::Io {
                context: context.into(),
                source,
            },
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Store { .. } | CliError::Io { .. } => crate::exitcode::IOERR,
            _ => crate::exitcode::USAGE,
        }
    }
}

/// Attaches an action description to store failures, e.g. "Failed to save anchor".
pub trait StoreContext<T> {
    fn action(self, action: &str) -> CliResult<T>;
}

impl<T> StoreContext<T> for Result<T, StoreError> {
    fn action(self, action: &str) -> CliResult<T> {
        self.map_err(|e| CliError::from(e).context(action))
    }
}

pub type CliResult<T> = Result<T, CliError>;
