//! Installer script fetching and invocation

use crate::command;
use crate::config::InstallerConfig;
use crate::download::Download;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use ve_env::{EnvironmentContext, vars};
use ve_fs::checksum;

/// A local installer script, ready to build requirements into `install_dir`.
#[derive(Debug)]
pub struct InstallerFetcher {
    install_dir: PathBuf,
    script: PathBuf,
    interpreter: PathBuf,
}

impl InstallerFetcher {
    /// Locate the installer script, downloading it if it is not present.
    ///
    /// A copy in `cwd` takes precedence; otherwise the script lives in
    /// `install_dir`. When a checksum is configured, the script is verified
    /// whether it was downloaded or already there.
    pub fn new(
        install_dir: &Path,
        cwd: &Path,
        interpreter: &Path,
        config: &InstallerConfig,
        downloader: &dyn Download,
    ) -> Result<Self> {
        let script = Self::locate(install_dir, cwd, &config.name);
        let fetcher = Self {
            install_dir: install_dir.to_path_buf(),
            script,
            interpreter: interpreter.to_path_buf(),
        };
        fetcher.ensure_script(config, downloader)?;
        Ok(fetcher)
    }

    /// Where the installer script is (or will be) stored.
    pub fn locate(install_dir: &Path, cwd: &Path, name: &str) -> PathBuf {
        let local = cwd.join(name);
        if local.is_file() {
            tracing::debug!(script = %local.display(), "using installer from working directory");
            local
        } else {
            install_dir.join(name)
        }
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Build `requirement` as an editable checkout inside the install dir.
    pub fn install(&self, requirement: &str, ctx: &EnvironmentContext) -> Result<()> {
        let mut cmd = command::command_in(&self.interpreter, ctx);
        cmd.arg(&self.script)
            .args(["-q", "--editable", "--build-directory"])
            .arg(&self.install_dir)
            .arg(requirement)
            .env(vars::PYTHONPATH, &self.install_dir);

        tracing::info!(
            "download {} with {}",
            requirement,
            command::describe(&cmd)
        );
        command::run(&mut cmd)
    }

    fn ensure_script(&self, config: &InstallerConfig, downloader: &dyn Download) -> Result<()> {
        if self.script.is_file() {
            if let Some(expected) = &config.sha256 {
                verify(&self.script, expected)?;
            }
            return Ok(());
        }

        tracing::info!("download {} to {}", config.url, self.script.display());
        let bytes = downloader.fetch(&config.url)?;
        ve_fs::io::write_atomic(&self.script, &bytes)?;

        if let Some(expected) = &config.sha256 {
            if let Err(e) = verify(&self.script, expected) {
                ve_fs::io::remove_file_if_exists(&self.script)?;
                return Err(e);
            }
        }
        Ok(())
    }
}

fn verify(path: &Path, expected: &str) -> Result<()> {
    let actual = checksum::compute_file_checksum(path)?;
    if checksum::matches(expected, &actual) {
        return Ok(());
    }
    Err(Error::ChecksumMismatch {
        path: path.to_path_buf(),
        expected: checksum::canonicalize(expected),
        actual,
    })
}
