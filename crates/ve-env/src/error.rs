//! Error types for ve-env

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ve_fs::Error),

    #[error("Activation script not found at {path}")]
    ActivationScriptMissing { path: PathBuf },
}
