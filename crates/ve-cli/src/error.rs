//! Error types for ve-cli

use std::error::Error as _;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from ve-bootstrap
    #[error(transparent)]
    Bootstrap(#[from] ve_bootstrap::Error),
}

impl CliError {
    /// Messages of this error and everything that caused it, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = self.source();
        while let Some(cause) = source {
            let message = cause.to_string();
            if messages.last() != Some(&message) {
                messages.push(message);
            }
            source = cause.source();
        }
        messages
    }
}
