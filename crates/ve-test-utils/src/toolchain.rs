//! Shell-script stand-ins for the external tools.
//!
//! The fake interpreter runs its first argument with `/bin/sh`, so the
//! "installer" and "creation tool" are plain shell scripts. Every call is
//! appended to a log so tests can assert on what ran and with which
//! arguments.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// How the fake installer behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerBehavior {
    /// Produce `virtualenv/virtualenv.py` in the build directory.
    Succeed,
    /// Exit with the given code without producing anything.
    Fail(i32),
    /// Exit 0 without producing the creation tool.
    SkipTool,
}

/// A directory holding a fake `python`, installer and creation tool.
pub struct FakeToolchain {
    dir: TempDir,
    installer: String,
}

impl Default for FakeToolchain {
    fn default() -> Self {
        Self::new(InstallerBehavior::Succeed, None)
    }
}

impl FakeToolchain {
    /// Build a toolchain. `creation_exit` makes the creation tool exit with
    /// that code before creating anything.
    pub fn new(installer: InstallerBehavior, creation_exit: Option<i32>) -> Self {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();

        let python = bin.join("python");
        fs::write(&python, "#!/bin/sh\nexec /bin/sh \"$@\"\n").unwrap();
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();

        let log = dir.path().join("calls.log");
        let template = dir.path().join("virtualenv.py.template");
        fs::write(&template, creation_tool_script(&log, creation_exit)).unwrap();

        let installer = installer_script(&log, &template, installer);
        Self { dir, installer }
    }

    /// Directory holding the fake `python`; put it on `PATH`.
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    /// Absolute path of the fake interpreter.
    pub fn python(&self) -> PathBuf {
        self.bin_dir().join("python")
    }

    /// A `PATH` value that finds the fake interpreter first.
    pub fn search_path(&self) -> String {
        format!("{}:/usr/bin:/bin", self.bin_dir().display())
    }

    /// Contents of the installer script.
    pub fn installer_script(&self) -> &str {
        &self.installer
    }

    /// Write the installer as `ez_setup.py` into `dir`.
    pub fn write_installer(&self, dir: &Path) -> PathBuf {
        let path = dir.join("ez_setup.py");
        fs::write(&path, &self.installer).unwrap();
        path
    }

    /// Calls recorded so far, one line each.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn installer_script(log: &Path, template: &Path, behavior: InstallerBehavior) -> String {
    let outcome = match behavior {
        InstallerBehavior::Succeed => format!(
            "mkdir -p \"$build/virtualenv\" && cp \"{}\" \"$build/virtualenv/virtualenv.py\"\n",
            template.display()
        ),
        InstallerBehavior::Fail(code) => format!("exit {}\n", code),
        InstallerBehavior::SkipTool => "exit 0\n".to_string(),
    };

    format!(
        r#"# fake installer
build=""
req=""
while [ $# -gt 0 ]; do
  case "$1" in
    --build-directory) build="$2"; shift 2 ;;
    -*) shift ;;
    *) req="$1"; shift ;;
  esac
done
echo "install $req build=$build pythonpath=$PYTHONPATH" >> "{log}"
{outcome}"#,
        log = log.display(),
        outcome = outcome,
    )
}

fn creation_tool_script(log: &Path, exit: Option<i32>) -> String {
    let early_exit = exit.map(|code| format!("exit {}\n", code)).unwrap_or_default();

    format!(
        r##"# fake virtualenv.py
echo "create $*" >> "{log}"
{early_exit}for dest in "$@"; do :; done
mkdir -p "$dest/bin" "$dest/lib/python2.7/site-packages"
printf '#!/bin/sh\n' > "$dest/bin/python"
echo "# activate" > "$dest/bin/activate_this.py"
"##,
        log = log.display(),
        early_exit = early_exit,
    )
}
