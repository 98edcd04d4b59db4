//! Install and activate a virtualenv from inside another program.
//!
//! Call [`use_virtualenv`] at the top of `main`: if the environment named
//! by the last argument does not exist yet, a pinned virtualenv release is
//! fetched into a scratch directory and run to create it. The environment
//! is then activated for the current process, so children spawned
//! afterwards pick up its interpreter and scripts.
//!
//! ```no_run
//! let args = vec!["--no-site-packages".to_string(), "build/env".to_string()];
//! ve_bootstrap::use_virtualenv(&args, &ve_bootstrap::BootstrapOptions::default())?;
//! # Ok::<(), ve_bootstrap::Error>(())
//! ```
//!
//! Everything except [`use_virtualenv`] works on an explicit
//! [`EnvironmentContext`] and never touches the real process environment.

mod command;
pub mod config;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod manager;
pub mod session;

pub use config::{BootstrapConfig, DEFAULT_VIRTUALENV_VERSION, InstallerConfig};
pub use download::{Download, HttpDownloader};
pub use error::{Error, ErrorKind, Result};
pub use fetcher::InstallerFetcher;
pub use manager::{EnvironmentManager, InstallOutcome};
pub use session::InstallSession;
pub use ve_env::{ActivationStatus, EnvironmentContext, EnvironmentDescriptor};

use std::path::Path;

/// Caller choices for [`use_virtualenv`]
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// virtualenv version; configuration decides when unset
    pub version: Option<String>,
    /// Activate the environment after making sure it exists
    pub activate: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            version: None,
            activate: true,
        }
    }
}

/// Install (if needed) and activate the environment for the running process.
///
/// `PYTHONHOME` is removed from the process before anything else happens.
/// On success the process environment reflects the activation.
pub fn use_virtualenv(args: &[String], options: &BootstrapOptions) -> Result<EnvironmentManager> {
    let cwd = std::env::current_dir().map_err(|e| ve_fs::Error::io(".", e))?;
    let mut ctx = EnvironmentContext::from_process();
    if ctx.discard_python_home().is_some() {
        ctx.apply_to_process();
    }

    let config = BootstrapConfig::load(&cwd, &ctx)?.with_version(options.version.clone());
    let (manager, outcome) = EnvironmentManager::open(args, config, &cwd, &ctx)?;
    tracing::debug!(?outcome, python = %manager.interpreter().display(), "environment ready");

    if options.activate {
        manager.activate(&mut ctx)?;
    }
    ctx.apply_to_process();
    Ok(manager)
}

/// Install (if needed) and optionally activate, entirely within `ctx`.
pub fn bootstrap(
    args: &[String],
    config: BootstrapConfig,
    cwd: &Path,
    ctx: &mut EnvironmentContext,
    activate: bool,
    downloader: &dyn Download,
) -> Result<EnvironmentManager> {
    let (manager, outcome) = EnvironmentManager::open_with(args, config, cwd, ctx, downloader)?;
    tracing::debug!(?outcome, root = %manager.descriptor().root().display(), "environment ready");

    if activate {
        manager.activate(ctx)?;
    }
    Ok(manager)
}
