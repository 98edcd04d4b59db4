//! Install-and-activate orchestration

use crate::command;
use crate::config::BootstrapConfig;
use crate::download::{Download, HttpDownloader};
use crate::error::{Error, Result};
use crate::session::InstallSession;
use std::path::{Path, PathBuf};
use ve_env::{ActivationStatus, EnvironmentContext, EnvironmentDescriptor};

/// What [`EnvironmentManager::open`] had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed,
}

/// A virtual environment that is known to be installed.
#[derive(Debug)]
pub struct EnvironmentManager {
    descriptor: EnvironmentDescriptor,
    interpreter: PathBuf,
    config: BootstrapConfig,
    cwd: PathBuf,
}

impl EnvironmentManager {
    /// Open the environment described by `args`, installing it first if
    /// needed. The installer script is downloaded over HTTP.
    pub fn open(
        args: &[String],
        config: BootstrapConfig,
        cwd: &Path,
        ctx: &EnvironmentContext,
    ) -> Result<(Self, InstallOutcome)> {
        let downloader = HttpDownloader::new(&config.installer);
        Self::open_with(args, config, cwd, ctx, &downloader)
    }

    /// Like [`open`](Self::open), with an explicit download source.
    pub fn open_with(
        args: &[String],
        config: BootstrapConfig,
        cwd: &Path,
        ctx: &EnvironmentContext,
        downloader: &dyn Download,
    ) -> Result<(Self, InstallOutcome)> {
        let interpreter = config.resolve_interpreter(cwd, ctx)?;
        let interpreter_name = interpreter
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InterpreterNotFound {
                name: config.python.clone(),
            })?;

        let manager = Self {
            descriptor: EnvironmentDescriptor::new(args, interpreter_name, cwd),
            interpreter,
            config,
            cwd: cwd.to_path_buf(),
        };

        if manager.descriptor.is_installed() {
            tracing::debug!(root = %manager.descriptor.root().display(), "already installed");
            return Ok((manager, InstallOutcome::AlreadyInstalled));
        }

        manager.install(ctx, downloader)?;
        Ok((manager, InstallOutcome::Installed))
    }

    pub fn descriptor(&self) -> &EnvironmentDescriptor {
        &self.descriptor
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Build the creation tool in a scratch directory and run it.
    ///
    /// The scratch directory is gone when this returns, on every path.
    pub fn install(&self, ctx: &EnvironmentContext, downloader: &dyn Download) -> Result<()> {
        tracing::info!("using virtualenv version {}", self.config.virtualenv_version);

        let session = InstallSession::open(&self.config, &self.cwd, &self.interpreter, downloader)?;
        session.install_requirement(ctx)?;

        let tool = session.creation_tool();
        if !tool.is_file() {
            return Err(Error::CreationToolMissing { path: tool });
        }

        let mut cmd = command::command_in(&self.interpreter, ctx);
        cmd.arg(&tool)
            .args(self.descriptor.creation_args())
            .current_dir(&self.cwd);
        tracing::info!("execute {}", command::describe(&cmd));
        command::run(&mut cmd)?;

        session.close()
    }

    /// Make this environment the active one in `ctx`.
    pub fn activate(&self, ctx: &mut EnvironmentContext) -> Result<ActivationStatus> {
        Ok(ve_env::activate(&self.descriptor, ctx)?)
    }
}
