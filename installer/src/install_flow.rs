//! Install orchestration.
//!
//! Sequences the install stages: prerequisite validation, path resolution,
//! source acquisition, configuration, data provisioning, the build pipeline,
//! and the optional admin account. The receipt is written only after every
//! stage has succeeded, so a receipt always denotes a complete install.

use crate::admin;
use crate::cli::InstallArgs;
use crate::envfile;
use crate::error::Result;
use crate::exec::CommandExecutor;
use crate::output::{write_notice, write_stderr_line, write_success};
use crate::pipeline::run_pipeline;
use crate::platform::{InstallTarget, Platform};
use crate::prereqs::check_prerequisites;
use crate::prompt::Prompter;
use crate::provision::provision_data_dirs;
use crate::receipt::InstallReceipt;
use crate::source::acquire_source;
use crate::store::insert_admin;
use camino::Utf8PathBuf;
use std::io::Write;

/// Runs the full installation.
///
/// # Errors
///
/// Propagates the first fatal error from any stage; nothing after the
/// failing stage runs and no receipt is written.
pub fn run_install(
    executor: &dyn CommandExecutor,
    prompter: &dyn Prompter,
    args: &InstallArgs,
    stderr: &mut dyn Write,
) -> Result<()> {
    let platform = Platform::detect()?;
    write_notice(stderr, format!("Detected platform: {platform}"));

    let report = check_prerequisites(executor, platform)?;
    write_notice(stderr, format!("Node.js {}", report.node_version));
    write_notice(stderr, &report.git_version);

    let install_path = match &args.install_dir {
        Some(dir) => dir.clone(),
        None => resolve_install_path(prompter, platform)?,
    };
    let target = InstallTarget::new(platform, install_path)?;

    write_notice(stderr, "Downloading the Ghost app...");
    acquire_source(executor, prompter, &target)?;

    write_notice(stderr, "Writing configuration...");
    envfile::configure(&target)?;

    write_notice(stderr, "Creating data directories...");
    provision_data_dirs(&target, prompter)?;

    run_pipeline(executor, &target.install_path, stderr)?;

    if !args.skip_admin
        && prompter.confirm("Do you want to create an admin user now?", true)?
    {
        let (name, handle, password) = admin::collect_credentials(prompter, stderr)?;
        let account = admin::build_account(name, handle, &password)?;
        insert_admin(&target.database_path, &account)?;
        write_success(stderr, format!("Admin user \"{}\" created", account.handle));
    }

    let receipt = InstallReceipt {
        install_path: target.install_path.clone(),
        data_path: target.data_path.clone(),
        database_path: target.database_path.clone(),
    };
    receipt.save()?;

    write_success(stderr, "GhostApp is ready to use");
    write_stderr_line(stderr, "Run `ghost start` to launch it.");
    Ok(())
}

/// Resolves the install directory interactively.
///
/// Confirms the platform default; a declined confirmation opens the
/// directory browser and the loop repeats with `<chosen>/<app dir>` as the
/// new candidate. Only the user terminates the loop.
///
/// # Errors
///
/// Returns an error if a prompt fails or the default cannot be derived from
/// the environment.
pub fn resolve_install_path(prompter: &dyn Prompter, platform: Platform) -> Result<Utf8PathBuf> {
    let mut candidate = platform.default_install_dir()?;
    loop {
        let accepted = prompter.confirm(
            &format!("Do you want to install the Ghost app in {candidate}?"),
            true,
        )?;
        if accepted {
            return Ok(candidate);
        }
        let chosen = prompter.select_directory(&candidate)?;
        candidate = chosen.join(platform.app_dir_name());
    }
}
