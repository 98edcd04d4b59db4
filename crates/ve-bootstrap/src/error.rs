//! Error types for ve-bootstrap

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ve_fs::Error),

    #[error(transparent)]
    Env(#[from] ve_env::Error),

    #[error("Failed to download {url}: {message}")]
    Network { url: String, message: String },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Command failed{}: {command}", exit_code_suffix(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("Environment creation tool not found at {path}; the installer did not produce it")]
    CreationToolMissing { path: PathBuf },

    #[error("Python interpreter '{name}' not found on PATH")]
    InterpreterNotFound { name: String },
}

fn exit_code_suffix(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

/// Coarse failure category, for callers choosing between retry and abort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetching the installer failed
    Network,
    /// A child process could not start or exited unsuccessfully
    Subprocess,
    /// Reading or writing local files failed
    Filesystem,
    /// A download did not match its pinned checksum
    Integrity,
    /// The environment exists but cannot be activated
    Activation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } => ErrorKind::Network,
            Error::CommandNotFound { .. }
            | Error::CommandFailed { .. }
            | Error::CreationToolMissing { .. }
            | Error::InterpreterNotFound { .. } => ErrorKind::Subprocess,
            Error::Fs(_) | Error::Env(ve_env::Error::Fs(_)) => ErrorKind::Filesystem,
            Error::ChecksumMismatch { .. } => ErrorKind::Integrity,
            Error::Env(ve_env::Error::ActivationScriptMissing { .. }) => ErrorKind::Activation,
        }
    }
}
