//! Target virtual environment description

use crate::context::{EnvironmentContext, vars};
use std::fs;
use std::path::{Path, PathBuf};

/// Executable-scripts subdirectory of an environment on this host.
pub const SCRIPTS_DIR: &str = if cfg!(windows) { "Scripts" } else { "bin" };

/// Arguments used for the creation tool when the caller gives none.
pub const DEFAULT_CREATION_ARGS: &[&str] = &["python"];

/// File name of the script that activates an environment in-process.
const ACTIVATION_SCRIPT: &str = "activate_this.py";

/// A virtual environment at a fixed location.
///
/// The root is the last creation argument, made absolute once at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    root: PathBuf,
    interpreter_name: String,
    creation_args: Vec<String>,
}

impl EnvironmentDescriptor {
    /// Describe the environment that `args` would create.
    ///
    /// `args` are the creation tool's arguments; the last one is the
    /// destination directory. Empty `args` fall back to
    /// [`DEFAULT_CREATION_ARGS`]. A relative destination is resolved
    /// against `cwd`.
    pub fn new(args: &[String], interpreter_name: impl Into<String>, cwd: &Path) -> Self {
        let creation_args: Vec<String> = if args.is_empty() {
            DEFAULT_CREATION_ARGS.iter().map(|s| s.to_string()).collect()
        } else {
            args.to_vec()
        };
        let destination = creation_args
            .last()
            .map(String::as_str)
            .unwrap_or_default();
        let root = ve_fs::absolutize(destination, cwd);

        Self {
            root,
            interpreter_name: interpreter_name.into(),
            creation_args,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interpreter_name(&self) -> &str {
        &self.interpreter_name
    }

    pub fn creation_args(&self) -> &[String] {
        &self.creation_args
    }

    /// Directory holding the environment's executables.
    pub fn scripts_directory(&self) -> PathBuf {
        self.root.join(SCRIPTS_DIR)
    }

    /// Path of the environment's own interpreter.
    pub fn interpreter_path(&self) -> PathBuf {
        self.scripts_directory().join(&self.interpreter_name)
    }

    /// Path of the in-process activation script.
    pub fn activation_script(&self) -> PathBuf {
        self.scripts_directory().join(ACTIVATION_SCRIPT)
    }

    /// Whether the environment's interpreter exists.
    pub fn is_installed(&self) -> bool {
        self.interpreter_path().is_file()
    }

    /// Whether `ctx` marks exactly this environment as active.
    ///
    /// Plain string comparison: a trailing slash or different case in the
    /// marker means "not this environment".
    pub fn is_activated(&self, ctx: &EnvironmentContext) -> bool {
        ctx.get_os(vars::VIRTUAL_ENV)
            .is_some_and(|active| active == self.root.as_os_str())
    }

    /// Existing `site-packages` directories inside the environment.
    pub fn site_packages_dirs(&self) -> Vec<PathBuf> {
        if cfg!(windows) {
            let dir = self.root.join("Lib").join("site-packages");
            return if dir.is_dir() { vec![dir] } else { vec![] };
        }

        let Ok(entries) = fs::read_dir(self.root.join("lib")) else {
            return vec![];
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
            .map(|entry| entry.path().join("site-packages"))
            .filter(|dir| dir.is_dir())
            .collect();
        dirs.sort();
        dirs
    }
}
