//! End-to-end bootstrap scenarios
//!
//! Exercises the complete flow: config loading -> install -> activation,
//! with the fake toolchain standing in for python, ez_setup and virtualenv.

#![cfg(unix)]

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ve_bootstrap::{
    ActivationStatus, BootstrapConfig, Download, EnvironmentContext, EnvironmentManager, Error,
    ErrorKind, InstallOutcome, Result, bootstrap,
};
use ve_env::vars;
use ve_test_utils::toolchain::{FakeToolchain, InstallerBehavior};

struct Mirror(String);

impl Download for Mirror {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone().into_bytes())
    }
}

fn context_for(toolchain: &FakeToolchain, extra: &[(&str, &str)]) -> EnvironmentContext {
    let mut ctx = EnvironmentContext::from_vars([(vars::PATH, toolchain.search_path())]);
    for (key, value) in extra {
        ctx.set(key, *value);
    }
    ctx
}

fn config_in(cwd: &Path, temp_root: &Path, ctx: &EnvironmentContext) -> BootstrapConfig {
    let mut config = BootstrapConfig::load(cwd, ctx).unwrap();
    config.temp_root = Some(temp_root.to_path_buf());
    config
}

#[test]
fn scenario_fresh_destination_is_created_and_activated() {
    let toolchain = FakeToolchain::default();
    let cwd = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let mut ctx = context_for(&toolchain, &[]);
    let config = config_in(cwd.path(), temp_root.path(), &ctx);
    let dest = cwd.path().join("envA");
    let args = vec!["python".to_string(), dest.to_string_lossy().into_owned()];

    let manager = bootstrap(
        &args,
        config,
        cwd.path(),
        &mut ctx,
        true,
        &Mirror(toolchain.installer_script().to_string()),
    )
    .unwrap();

    assert!(dest.join("bin").join("python").is_file());
    assert_eq!(ctx.get(vars::VIRTUAL_ENV), Some(&*dest.to_string_lossy()));
    assert_eq!(
        manager.activate(&mut ctx).unwrap(),
        ActivationStatus::AlreadyActive
    );
    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
}

#[test]
fn scenario_python_home_is_dropped_before_install() {
    let toolchain = FakeToolchain::default();
    let cwd = TempDir::new().unwrap();
    let mut ctx = context_for(&toolchain, &[(vars::PYTHONHOME, "/opt/old")]);

    let discarded = ctx.discard_python_home();

    assert_eq!(discarded.as_deref(), Some(std::ffi::OsStr::new("/opt/old")));
    assert!(!ctx.contains(vars::PYTHONHOME));

    // Children of the bootstrap no longer see it either
    toolchain.write_installer(cwd.path());
    let temp_root = TempDir::new().unwrap();
    let config = config_in(cwd.path(), temp_root.path(), &ctx);
    bootstrap(
        &["envA".to_string()],
        config,
        cwd.path(),
        &mut ctx,
        true,
        &Mirror(String::new()),
    )
    .unwrap();
    assert!(!ctx.contains(vars::PYTHONHOME));
}

#[test]
fn scenario_config_file_pins_version() {
    let toolchain = FakeToolchain::default();
    let cwd = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    toolchain.write_installer(cwd.path());
    fs::write(
        cwd.path().join("ve-setup.toml"),
        "virtualenv_version = \"1.4.9\"\n",
    )
    .unwrap();
    let ctx = context_for(&toolchain, &[]);
    let config = config_in(cwd.path(), temp_root.path(), &ctx);

    let (_, outcome) = EnvironmentManager::open_with(
        &["envA".to_string()],
        config,
        cwd.path(),
        &ctx,
        &Mirror(String::new()),
    )
    .unwrap();

    assert_eq!(outcome, InstallOutcome::Installed);
    assert!(toolchain.calls()[0].starts_with("install virtualenv==1.4.9 "));
}

#[test]
fn scenario_pinned_checksum_rejects_tampered_installer() {
    let toolchain = FakeToolchain::default();
    let cwd = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    let expected = ve_fs::checksum::compute_bytes_checksum(toolchain.installer_script().as_bytes());
    let ctx = context_for(&toolchain, &[("VE_SETUP_INSTALLER_SHA256", expected.as_str())]);
    let config = config_in(cwd.path(), temp_root.path(), &ctx);

    let err = EnvironmentManager::open_with(
        &["envA".to_string()],
        config.clone(),
        cwd.path(),
        &ctx,
        &Mirror("echo tampered".to_string()),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Integrity);
    assert!(toolchain.calls().is_empty());
    assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);

    // The genuine script passes and installs
    let (_, outcome) = EnvironmentManager::open_with(
        &["envA".to_string()],
        config,
        cwd.path(),
        &ctx,
        &Mirror(toolchain.installer_script().to_string()),
    )
    .unwrap();
    assert_eq!(outcome, InstallOutcome::Installed);
}

#[test]
fn scenario_failed_install_is_retried_next_run() {
    let broken = FakeToolchain::new(InstallerBehavior::Succeed, Some(1));
    let cwd = TempDir::new().unwrap();
    let temp_root = TempDir::new().unwrap();
    broken.write_installer(cwd.path());
    let ctx = context_for(&broken, &[]);

    let err = EnvironmentManager::open_with(
        &["envA".to_string()],
        config_in(cwd.path(), temp_root.path(), &ctx),
        cwd.path(),
        &ctx,
        &Mirror(String::new()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::CommandFailed { exit_code: Some(1), .. }));

    let working = FakeToolchain::default();
    working.write_installer(cwd.path());
    let ctx = context_for(&working, &[]);
    let (manager, outcome) = EnvironmentManager::open_with(
        &["envA".to_string()],
        config_in(cwd.path(), temp_root.path(), &ctx),
        cwd.path(),
        &ctx,
        &Mirror(String::new()),
    )
    .unwrap();

    assert_eq!(outcome, InstallOutcome::Installed);
    assert!(manager.descriptor().is_installed());
}
