//! Child process execution

use crate::error::{Error, Result};
use std::process::{Command, Stdio};
use ve_env::EnvironmentContext;

/// Build a command whose environment is exactly `ctx`.
pub(crate) fn command_in(program: impl AsRef<std::ffi::OsStr>, ctx: &EnvironmentContext) -> Command {
    let mut cmd = Command::new(program);
    cmd.env_clear().envs(ctx.vars());
    cmd
}

/// Render a command line for logs and error messages.
pub(crate) fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `cmd` to completion with inherited stdio.
///
/// A command that cannot be started returns [`Error::CommandNotFound`];
/// a non-zero exit returns [`Error::CommandFailed`].
pub(crate) fn run(cmd: &mut Command) -> Result<()> {
    let command = describe(cmd);
    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            tracing::debug!(%command, error = %e, "spawn failed");
            Error::CommandNotFound {
                command: command.clone(),
            }
        })?;

    if !status.success() {
        return Err(Error::CommandFailed {
            command,
            exit_code: status.code(),
        });
    }

    Ok(())
}
