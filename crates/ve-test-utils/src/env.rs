//! On-disk layouts of created environments.

use std::fs;
use std::path::{Path, PathBuf};

/// Scripts subdirectory name on this host.
pub const SCRIPTS_DIR: &str = if cfg!(windows) { "Scripts" } else { "bin" };

/// Lay out the files a successful creation tool run leaves behind:
/// the interpreter, the activation script and one `site-packages`.
///
/// Returns the scripts directory.
pub fn create_fake_env(root: &Path, interpreter_name: &str) -> PathBuf {
    let scripts = root.join(SCRIPTS_DIR);
    fs::create_dir_all(&scripts).unwrap();
    fs::write(scripts.join(interpreter_name), "fake").unwrap();
    fs::write(scripts.join("activate_this.py"), "# activate").unwrap();
    fs::create_dir_all(root.join("lib").join("python2.7").join("site-packages")).unwrap();
    scripts
}
