//! CLI argument parsing using clap derive

use clap::Parser;

/// Install virtualenv if needed and create an environment with it
#[derive(Parser, Debug)]
#[command(name = "ve-setup")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(override_usage = "ve-setup [--version=VERSION] [[virtualenv options] DEST_DIR]")]
pub struct Cli {
    /// virtualenv version [default: 1.5.1]
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Options passed to virtualenv, ending with the destination directory
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}
