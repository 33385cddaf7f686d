//! Post-install lifecycle commands.
//!
//! Every command here starts from the install receipt rather than ambient
//! environment variables; a missing receipt means the app was never
//! installed and the command fails before touching anything.

use crate::error::{InstallerError, Result};
use crate::exec::CommandExecutor;
use crate::output::{write_notice, write_stderr_line, write_success};
use crate::pipeline::run_pipeline;
use crate::prompt::Prompter;
use crate::receipt::InstallReceipt;
use crate::source::update_source;
use std::io::Write;

/// Starts the installed app in the foreground.
///
/// Blocks on `npm start` with inherited stdio until the app exits.
///
/// # Errors
///
/// Returns [`InstallerError::NotInstalled`] without invoking any process
/// when no receipt exists, and [`InstallerError::PipelineStep`] if the app
/// exits with a non-zero status.
pub fn run_start(executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let receipt = InstallReceipt::load()?;
    write_notice(stderr, "Starting GhostApp...");
    write_stderr_line(
        stderr,
        "The app runs in this window; do not close it. Press Ctrl+C to stop.",
    );

    let status = executor.run_streaming("npm", &["start"], Some(&receipt.install_path))?;
    if status.success() {
        Ok(())
    } else {
        Err(InstallerError::PipelineStep {
            step: "application start",
            message: format!("npm exited with {status}"),
        })
    }
}

/// Pulls the latest app source and reruns the build pipeline.
///
/// # Errors
///
/// Returns [`InstallerError::NotInstalled`] when no receipt exists, or the
/// first failure from the pull or the pipeline.
pub fn run_update(executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let receipt = InstallReceipt::load()?;
    write_notice(stderr, "Updating GhostApp...");
    update_source(executor, &receipt.install_path)?;
    run_pipeline(executor, &receipt.install_path, stderr)?;
    write_success(stderr, "GhostApp is up to date");
    Ok(())
}

/// Explains how to stop the app.
///
/// The app runs in the foreground under `ghost start`; there is no daemon to
/// signal, so this is purely informational.
pub fn run_stop(stderr: &mut dyn Write) {
    write_stderr_line(
        stderr,
        "GhostApp runs in the foreground; stop it by pressing Ctrl+C in the \
         window running `ghost start`.",
    );
}

/// Stop semantics followed by a fresh start.
///
/// # Errors
///
/// Propagates [`run_start`]'s errors.
pub fn run_restart(executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    run_stop(stderr);
    run_start(executor, stderr)
}

/// Removes the installed app, its data, and the receipt, after confirmation.
///
/// # Errors
///
/// Returns [`InstallerError::NotInstalled`] when no receipt exists, or any
/// I/O error from the removals.
pub fn run_uninstall(prompter: &dyn Prompter, stderr: &mut dyn Write) -> Result<()> {
    let receipt = InstallReceipt::load()?;
    let confirmed = prompter.confirm(
        "Remove the Ghost app and all of its data? This cannot be undone",
        false,
    )?;
    if !confirmed {
        write_stderr_line(stderr, "Uninstall cancelled; nothing was removed.");
        return Ok(());
    }

    remove_tree(&receipt.install_path)?;
    remove_tree(&receipt.data_path)?;
    InstallReceipt::remove()?;
    write_success(stderr, "GhostApp has been removed");
    Ok(())
}

/// Removes a directory tree, tolerating one that is already gone.
fn remove_tree(path: &camino::Utf8Path) -> Result<()> {
    match std::fs::remove_dir_all(path.as_std_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        Answer, ExpectedCall, ScriptedPrompter, StubExecutor, success_output,
    };
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn with_receipt<T>(
        install_path: Utf8PathBuf,
        data_path: Utf8PathBuf,
        f: impl FnOnce() -> T,
    ) -> T {
        let temp = TempDir::new().expect("failed to create temp dir");
        temp_env::with_var("XDG_CONFIG_HOME", Some(temp.path()), || {
            InstallReceipt {
                database_path: format!("file:{}", data_path.join("database.db")),
                install_path,
                data_path,
            }
            .save()
            .expect("receipt save should succeed");
            f()
        })
    }

    #[test]
    fn start_without_receipt_invokes_nothing() {
        let temp = TempDir::new().expect("failed to create temp dir");
        temp_env::with_var("XDG_CONFIG_HOME", Some(temp.path()), || {
            let executor = StubExecutor::new(vec![]);
            let mut stderr = Vec::new();

            let err = run_start(&executor, &mut stderr).expect_err("start should fail");
            assert!(matches!(err, InstallerError::NotInstalled));
            executor.assert_finished();
        });
    }

    #[test]
    fn start_runs_npm_in_the_install_directory() {
        let install = Utf8PathBuf::from("/home/user/.ghostapp");
        with_receipt(install.clone(), Utf8PathBuf::from("/tmp/data"), || {
            let executor = StubExecutor::new(vec![
                ExpectedCall::new("npm", &["start"], Ok(success_output())).in_dir(&install),
            ]);
            let mut stderr = Vec::new();

            run_start(&executor, &mut stderr).expect("start should succeed");
            executor.assert_finished();

            let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
            assert!(text.contains("do not close"));
        });
    }

    #[test]
    fn update_pulls_then_rebuilds() {
        let install = Utf8PathBuf::from("/home/user/.ghostapp");
        with_receipt(install.clone(), Utf8PathBuf::from("/tmp/data"), || {
            let mut calls =
                vec![ExpectedCall::new("git", &["pull"], Ok(success_output())).in_dir(&install)];
            for step in crate::pipeline::PIPELINE_STEPS {
                calls.push(
                    ExpectedCall::new(step.cmd, step.args, Ok(success_output())).in_dir(&install),
                );
            }
            let executor = StubExecutor::new(calls);
            let mut stderr = Vec::new();

            run_update(&executor, &mut stderr).expect("update should succeed");
            executor.assert_finished();
        });
    }

    #[test]
    fn declined_uninstall_leaves_everything_in_place() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let base = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let install = base.join("app");
        let data = base.join("data");
        std::fs::create_dir(install.as_std_path()).expect("mkdir install");
        std::fs::create_dir(data.as_std_path()).expect("mkdir data");

        with_receipt(install.clone(), data.clone(), || {
            let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);
            let mut stderr = Vec::new();

            run_uninstall(&prompter, &mut stderr).expect("declining is not an error");
            assert!(install.is_dir());
            assert!(data.is_dir());
            InstallReceipt::load().expect("receipt should survive a declined uninstall");
        });
    }

    #[test]
    fn confirmed_uninstall_removes_trees_and_receipt() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let base = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let install = base.join("app");
        let data = base.join("data");
        std::fs::create_dir(install.as_std_path()).expect("mkdir install");
        std::fs::create_dir(data.as_std_path()).expect("mkdir data");

        with_receipt(install.clone(), data.clone(), || {
            let prompter = ScriptedPrompter::new(vec![Answer::Confirm(true)]);
            let mut stderr = Vec::new();

            run_uninstall(&prompter, &mut stderr).expect("uninstall should succeed");
            assert!(!install.exists());
            assert!(!data.exists());
            assert!(matches!(
                InstallReceipt::load().expect_err("receipt should be gone"),
                InstallerError::NotInstalled
            ));
        });
    }
}
