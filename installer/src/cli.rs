//! Command-line interface definition.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Installer and lifecycle manager for the Ghost app.
#[derive(Debug, Parser)]
#[command(name = "ghost", version, about = "Install and manage the Ghost app")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Lifecycle commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install the Ghost app on this machine.
    Install(InstallArgs),
    /// Start the installed app.
    Start,
    /// Update the installed app to the latest version and rebuild it.
    Update,
    /// Print how to stop the running app, then start it again.
    Restart,
    /// Explain how to stop the running app.
    Stop,
    /// Remove the installed app and its data.
    Uninstall,
}

/// Options for `ghost install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Install into this directory instead of resolving it interactively.
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,

    /// Skip the optional admin-account creation step.
    #[arg(long)]
    pub skip_admin: bool,
}
