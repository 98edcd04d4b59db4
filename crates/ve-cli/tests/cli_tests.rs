//! End-to-end tests for the ve-setup binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ve_setup() -> Command {
    let mut cmd = Command::cargo_bin("ve-setup").unwrap();
    for key in [
        "VE_SETUP_PYTHON",
        "VE_SETUP_VERSION",
        "VE_SETUP_INSTALLER_URL",
        "VE_SETUP_INSTALLER_SHA256",
        "VE_SETUP_DEBUG",
        "VIRTUAL_ENV",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help_shows_usage() {
    ve_setup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEST_DIR"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_version_requires_value() {
    ve_setup().arg("--version").assert().failure();
}

#[test]
fn test_missing_interpreter_exits_one() {
    let cwd = TempDir::new().unwrap();
    ve_setup()
        .current_dir(cwd.path())
        .env("PATH", cwd.path())
        .env("VE_SETUP_PYTHON", "no-such-python")
        .arg("envA")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no-such-python"));
}

#[cfg(unix)]
mod with_fake_toolchain {
    use super::*;
    use ve_test_utils::toolchain::{FakeToolchain, InstallerBehavior};

    struct Setup {
        toolchain: FakeToolchain,
        cwd: TempDir,
        temp_root: TempDir,
    }

    impl Setup {
        fn new(toolchain: FakeToolchain) -> Self {
            let setup = Self {
                toolchain,
                cwd: TempDir::new().unwrap(),
                temp_root: TempDir::new().unwrap(),
            };
            setup.toolchain.write_installer(setup.cwd.path());
            setup
        }

        fn command(&self) -> Command {
            let mut cmd = ve_setup();
            cmd.current_dir(self.cwd.path())
                .env("PATH", self.toolchain.search_path())
                .env("VE_SETUP_TEMP_ROOT", self.temp_root.path());
            cmd
        }
    }

    #[test]
    fn test_creates_environment() {
        let setup = Setup::new(FakeToolchain::default());

        setup.command().arg("envA").assert().success();

        assert!(setup.cwd.path().join("envA/bin/python").is_file());
        assert_eq!(std::fs::read_dir(setup.temp_root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_python_home_is_discarded_with_warning() {
        let setup = Setup::new(FakeToolchain::default());

        setup
            .command()
            .env("PYTHONHOME", "/opt/old")
            .arg("envA")
            .assert()
            .success()
            .stderr(predicate::str::contains("PYTHONHOME"));
    }

    #[test]
    fn test_forwards_version_and_options() {
        let setup = Setup::new(FakeToolchain::default());

        setup
            .command()
            .args(["--version=1.4.9", "--no-site-packages", "envA"])
            .assert()
            .success();

        let calls = setup.toolchain.calls();
        assert!(calls[0].starts_with("install virtualenv==1.4.9 "));
        assert_eq!(calls[1], "create --no-site-packages envA");
    }

    #[test]
    fn test_default_destination() {
        let setup = Setup::new(FakeToolchain::default());

        setup.command().assert().success();

        assert!(setup.cwd.path().join("python/bin/python").is_file());
    }

    #[test]
    fn test_installer_failure_exits_one() {
        let setup = Setup::new(FakeToolchain::new(InstallerBehavior::Fail(3), None));

        setup
            .command()
            .arg("envA")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exit code 3"));

        assert_eq!(std::fs::read_dir(setup.temp_root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_config_file_is_reported() {
        let setup = Setup::new(FakeToolchain::default());
        std::fs::write(setup.cwd.path().join("ve-setup.toml"), "python = [").unwrap();

        setup
            .command()
            .arg("envA")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("ve-setup.toml"));
    }

    #[test]
    fn test_existing_environment_is_reused() {
        let setup = Setup::new(FakeToolchain::default());
        ve_test_utils::env::create_fake_env(&setup.cwd.path().join("envA"), "python");

        setup.command().arg("envA").assert().success();

        assert!(setup.toolchain.calls().is_empty());
    }
}
