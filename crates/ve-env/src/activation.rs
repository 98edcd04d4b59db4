//! Environment activation
//!
//! Activation edits an [`EnvironmentContext`] so that child processes and
//! executable lookups prefer the environment: the marker variable names the
//! root, the scripts directory leads `PATH`, and `PYTHONHOME` is cleared as
//! the environment's shell `activate` script does.

use crate::context::{EnvironmentContext, vars};
use crate::descriptor::EnvironmentDescriptor;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Outcome of an activation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationStatus {
    /// The context already named this environment; nothing changed.
    AlreadyActive,
    /// The context was updated.
    Activated {
        /// Module directories the environment's interpreter will search
        site_packages: Vec<PathBuf>,
    },
}

/// Activate `descriptor` in `ctx`.
///
/// A context that already names this environment is left untouched, so
/// activating twice is the same as activating once.
///
/// # Errors
///
/// Returns [`Error::ActivationScriptMissing`] if the environment has no
/// activation script, which means it was not fully created.
pub fn activate(
    descriptor: &EnvironmentDescriptor,
    ctx: &mut EnvironmentContext,
) -> Result<ActivationStatus> {
    if descriptor.is_activated(ctx) {
        tracing::debug!(root = %descriptor.root().display(), "already active");
        return Ok(ActivationStatus::AlreadyActive);
    }

    let script = descriptor.activation_script();
    if !script.is_file() {
        return Err(Error::ActivationScriptMissing { path: script });
    }

    ctx.remove(vars::PYTHONHOME);
    ctx.set(vars::VIRTUAL_ENV, descriptor.root());

    let scripts_dir = descriptor.scripts_directory();
    let current_path = ctx.get_os(vars::PATH).unwrap_or_default();
    if ve_fs::search_path_contains(current_path, &scripts_dir) {
        tracing::debug!(dir = %scripts_dir.display(), "already on PATH");
    } else {
        let updated = ve_fs::prepend_search_path(ctx.get_os(vars::PATH), &scripts_dir);
        ctx.set(vars::PATH, updated);
    }

    let site_packages = descriptor.site_packages_dirs();
    tracing::info!(
        root = %descriptor.root().display(),
        site_packages = site_packages.len(),
        "activated environment"
    );

    Ok(ActivationStatus::Activated { site_packages })
}
