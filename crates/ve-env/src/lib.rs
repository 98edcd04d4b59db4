//! Virtual environment model for ve-bootstrap.
//!
//! [`EnvironmentDescriptor`] answers "where is it" and "is it there";
//! [`EnvironmentContext`] is an owned copy of the process environment that
//! activation edits, so nothing here touches ambient state until the caller
//! explicitly applies the context.

pub mod activation;
pub mod context;
pub mod descriptor;
pub mod error;

pub use activation::{ActivationStatus, activate};
pub use context::{EnvironmentContext, vars};
pub use descriptor::{DEFAULT_CREATION_ARGS, EnvironmentDescriptor, SCRIPTS_DIR};
pub use error::{Error, Result};
