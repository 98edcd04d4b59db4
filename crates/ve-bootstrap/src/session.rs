//! Scoped install attempts

use crate::config::BootstrapConfig;
use crate::download::Download;
use crate::error::Result;
use crate::fetcher::InstallerFetcher;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ve_env::EnvironmentContext;

/// Prefix of temporary build directory names
pub const BUILD_DIR_PREFIX: &str = "ve-setup-";

/// One attempt at building the creation tool.
///
/// Owns a fresh temporary build directory. The directory is removed when
/// the session is closed or dropped, so it never outlives the attempt,
/// whether that attempt succeeded or failed.
#[derive(Debug)]
pub struct InstallSession {
    fetcher: InstallerFetcher,
    requirement: String,
    build_dir: TempDir,
}

impl InstallSession {
    /// Create the build directory and make the installer available in it.
    pub fn open(
        config: &BootstrapConfig,
        cwd: &Path,
        interpreter: &Path,
        downloader: &dyn Download,
    ) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(BUILD_DIR_PREFIX);
        let build_dir = match &config.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| {
            ve_fs::Error::io(
                config.temp_root.clone().unwrap_or_else(std::env::temp_dir),
                e,
            )
        })?;
        tracing::debug!(dir = %build_dir.path().display(), "opened build directory");

        let fetcher = InstallerFetcher::new(
            build_dir.path(),
            cwd,
            interpreter,
            &config.installer,
            downloader,
        )?;

        Ok(Self {
            fetcher,
            requirement: config.requirement(),
            build_dir,
        })
    }

    pub fn build_dir(&self) -> &Path {
        self.build_dir.path()
    }

    pub fn installer_script(&self) -> &Path {
        self.fetcher.script()
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Where the installer leaves the creation tool.
    pub fn creation_tool(&self) -> PathBuf {
        self.build_dir().join("virtualenv").join("virtualenv.py")
    }

    /// Run the installer for this session's requirement.
    pub fn install_requirement(&self, ctx: &EnvironmentContext) -> Result<()> {
        self.fetcher.install(&self.requirement, ctx)
    }

    /// Remove the build directory, reporting failures that a plain drop
    /// would swallow.
    pub fn close(self) -> Result<()> {
        let path = self.build_dir.path().to_path_buf();
        self.build_dir
            .close()
            .map_err(|e| ve_fs::Error::io(path, e))?;
        Ok(())
    }
}
