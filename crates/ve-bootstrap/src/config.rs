//! Bootstrap configuration
//!
//! Values are layered: built-in defaults, then `ve-setup.toml` in the
//! working directory, then `VE_SETUP_*` environment variables, then
//! whatever the caller sets explicitly (the CLI's `--version`).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::time::Duration;
use ve_env::{EnvironmentContext, vars};

/// virtualenv release installed when nothing else is asked for
pub const DEFAULT_VIRTUALENV_VERSION: &str = "1.5.1";

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "ve-setup.toml";

/// Environment variables that override config file values
pub mod env_keys {
    pub const PYTHON: &str = "VE_SETUP_PYTHON";
    pub const VERSION: &str = "VE_SETUP_VERSION";
    pub const INSTALLER_URL: &str = "VE_SETUP_INSTALLER_URL";
    pub const INSTALLER_SHA256: &str = "VE_SETUP_INSTALLER_SHA256";
    pub const TEMP_ROOT: &str = "VE_SETUP_TEMP_ROOT";
    pub const DEBUG: &str = "VE_SETUP_DEBUG";
}

/// Where and how to obtain the installer script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// File name of the installer script
    pub name: String,
    /// URL the script is fetched from when not present locally
    pub url: String,
    /// Expected checksum (`sha256:<hex>` or bare hex)
    pub sha256: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            name: "ez_setup.py".to_string(),
            url: "http://peak.telecommunity.com/dist/ez_setup.py".to_string(),
            sha256: None,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
        }
    }
}

impl InstallerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// virtualenv release to install
    pub virtualenv_version: String,
    /// Interpreter that runs the installer and creation tool
    pub python: String,
    pub installer: InstallerConfig,
    /// Parent of temporary build directories; the OS temp dir when unset
    pub temp_root: Option<PathBuf>,
    /// Report errors with their full cause chain
    pub debug: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            virtualenv_version: DEFAULT_VIRTUALENV_VERSION.to_string(),
            python: "python".to_string(),
            installer: InstallerConfig::default(),
            temp_root: None,
            debug: false,
        }
    }
}

impl BootstrapConfig {
    /// Load configuration for a bootstrap running in `cwd`.
    pub fn load(cwd: &Path, ctx: &EnvironmentContext) -> Result<Self> {
        let file = cwd.join(CONFIG_FILE);
        let config = ve_fs::config::load_toml_if_exists::<Self>(&file)?.unwrap_or_default();
        Ok(config.with_env_overrides(ctx))
    }

    /// Apply `VE_SETUP_*` overrides found in `ctx`.
    pub fn with_env_overrides(mut self, ctx: &EnvironmentContext) -> Self {
        if let Some(python) = ctx.get(env_keys::PYTHON) {
            self.python = python.to_string();
        }
        if let Some(version) = ctx.get(env_keys::VERSION) {
            self.virtualenv_version = version.to_string();
        }
        if let Some(url) = ctx.get(env_keys::INSTALLER_URL) {
            self.installer.url = url.to_string();
        }
        if let Some(sha256) = ctx.get(env_keys::INSTALLER_SHA256) {
            self.installer.sha256 = Some(sha256.to_string());
        }
        if let Some(root) = ctx.get(env_keys::TEMP_ROOT) {
            self.temp_root = Some(PathBuf::from(root));
        }
        if let Some(debug) = ctx.get(env_keys::DEBUG) {
            self.debug = matches!(debug.trim(), "1" | "true" | "yes" | "on");
        }
        self
    }

    /// Override the virtualenv version if one is given.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        if let Some(version) = version {
            self.virtualenv_version = version;
        }
        self
    }

    /// Requirement specifier handed to the installer.
    pub fn requirement(&self) -> String {
        format!("virtualenv=={}", self.virtualenv_version)
    }

    /// Find the interpreter executable.
    ///
    /// A value containing a path separator is taken as a path relative to
    /// `cwd`; a bare name is searched for on the context's `PATH`.
    pub fn resolve_interpreter(&self, cwd: &Path, ctx: &EnvironmentContext) -> Result<PathBuf> {
        let not_found = || Error::InterpreterNotFound {
            name: self.python.clone(),
        };

        if self.python.contains('/') || self.python.contains(MAIN_SEPARATOR) {
            let path = ve_fs::absolutize(&self.python, cwd);
            return if ve_fs::path::is_executable(&path) {
                Ok(path)
            } else {
                Err(not_found())
            };
        }

        let search_path = ctx.get_os(vars::PATH).unwrap_or_default();
        let found =
            ve_fs::path::find_on_search_path(&self.python, search_path, ctx.get(vars::PATHEXT))
                .ok_or_else(not_found)?;
        tracing::debug!(python = %found.display(), "resolved interpreter");
        Ok(found)
    }
}
