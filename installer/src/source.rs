//! Source acquisition for the Ghost app.
//!
//! The app source is fetched with `git clone` into the resolved install
//! directory. Clone failures are classified from stderr and handed to the
//! shared conflict policy, which asks the user before destroying a previous
//! installation and retrying the clone.

use crate::error::{InstallerError, Result};
use crate::exec::{CommandExecutor, stderr_message};
use crate::fsops::{self, ClassifiedFailure, FailureKind};
use crate::platform::InstallTarget;
use crate::prompt::Prompter;
use camino::Utf8Path;

/// Repository URL for cloning the Ghost app.
pub const GHOST_REPO_URL: &str = "https://github.com/eliyya/ghost";

/// Clones the app into the target's install directory, resolving conflicts
/// through the shared [`fsops::resolve_conflict`] policy.
///
/// # Errors
///
/// Returns [`InstallerError::PermissionDenied`] with a platform-specific
/// hint, [`InstallerError::TargetExists`] when the user declines to
/// overwrite an existing directory, or [`InstallerError::Git`] for any other
/// clone failure.
pub fn acquire_source(
    executor: &dyn CommandExecutor,
    prompter: &dyn Prompter,
    target: &InstallTarget,
) -> Result<()> {
    fsops::resolve_conflict(
        &target.install_path,
        target.platform,
        "downloading the Ghost app",
        prompter,
        || clone(executor, &target.install_path),
    )
}

/// Pulls the latest changes in an existing installation.
///
/// # Errors
///
/// Returns [`InstallerError::Git`] if the pull fails.
pub fn update_source(executor: &dyn CommandExecutor, install_path: &Utf8Path) -> Result<()> {
    let output = executor.run("git", &["pull"], Some(install_path))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(InstallerError::Git {
            operation: "pull",
            message: stderr_message(&output),
        })
    }
}

/// Runs one clone attempt, classifying failures from the tool's stderr.
fn clone(
    executor: &dyn CommandExecutor,
    install_path: &Utf8Path,
) -> std::result::Result<(), ClassifiedFailure> {
    let output = executor
        .run("git", &["clone", GHOST_REPO_URL, install_path.as_str()], None)
        .map_err(|error| ClassifiedFailure {
            kind: FailureKind::Other,
            error,
        })?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = stderr_message(&output);
    Err(ClassifiedFailure {
        kind: fsops::classify_stderr(&stderr),
        error: InstallerError::Git {
            operation: "clone",
            message: stderr,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::test_utils::{
        Answer, ExpectedCall, ScriptedPrompter, StubExecutor, failure_output, success_output,
    };
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn linux_target(install_path: Utf8PathBuf) -> InstallTarget {
        InstallTarget {
            platform: Platform::Linux,
            install_path,
            data_path: Utf8PathBuf::from("/tmp/.config/.ghostapp"),
            database_path: "file:/tmp/.config/.ghostapp/database.db".to_owned(),
        }
    }

    fn clone_call(install_path: &Utf8Path, result: std::process::Output) -> ExpectedCall {
        ExpectedCall::new(
            "git",
            &["clone", GHOST_REPO_URL, install_path.as_str()],
            Ok(result),
        )
    }

    #[test]
    fn successful_clone_needs_no_prompting() {
        let target = linux_target(Utf8PathBuf::from("/home/user/.ghostapp"));
        let executor = StubExecutor::new(vec![clone_call(&target.install_path, success_output())]);
        let prompter = ScriptedPrompter::new(vec![]);

        acquire_source(&executor, &prompter, &target).expect("clone should succeed");
        executor.assert_finished();
        prompter.assert_finished();
    }

    #[test]
    fn permission_failure_is_fatal_with_elevation_hint() {
        let target = linux_target(Utf8PathBuf::from("/opt/ghost"));
        let executor = StubExecutor::new(vec![clone_call(
            &target.install_path,
            failure_output("fatal: could not create work tree dir: Permission denied"),
        )]);
        let prompter = ScriptedPrompter::new(vec![]);

        let err = acquire_source(&executor, &prompter, &target)
            .expect_err("permission failure should be fatal");
        assert!(matches!(err, InstallerError::PermissionDenied { hint, .. } if hint == "with sudo"));
    }

    #[test]
    fn confirmed_overwrite_removes_tree_and_retries_once() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let base = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let install = base.join("ghost");
        std::fs::create_dir(install.as_std_path()).expect("failed to pre-create install dir");
        std::fs::write(install.join("stale.txt").as_std_path(), b"old")
            .expect("failed to write stale file");

        let target = linux_target(install.clone());
        let executor = StubExecutor::new(vec![
            clone_call(
                &install,
                failure_output(&format!(
                    "fatal: destination path '{install}' already exists and is not an empty directory."
                )),
            ),
            clone_call(&install, success_output()),
        ]);
        let prompter = ScriptedPrompter::new(vec![Answer::Confirm(true)]);

        acquire_source(&executor, &prompter, &target).expect("retry should succeed");
        assert!(!install.exists(), "existing tree should have been removed");
        executor.assert_finished();
        prompter.assert_finished();
    }

    #[test]
    fn declined_overwrite_is_fatal_and_leaves_tree() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let base = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        let install = base.join("ghost");
        std::fs::create_dir(install.as_std_path()).expect("failed to pre-create install dir");

        let target = linux_target(install.clone());
        let executor = StubExecutor::new(vec![clone_call(
            &install,
            failure_output("fatal: destination path already exists"),
        )]);
        let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

        let err = acquire_source(&executor, &prompter, &target)
            .expect_err("declined overwrite should fail");
        assert!(matches!(err, InstallerError::TargetExists { path } if path == install));
        assert!(install.exists());
    }

    #[test]
    fn unclassified_failure_is_a_generic_git_error() {
        let target = linux_target(Utf8PathBuf::from("/home/user/.ghostapp"));
        let executor = StubExecutor::new(vec![clone_call(
            &target.install_path,
            failure_output("fatal: unable to access remote: network unreachable"),
        )]);
        let prompter = ScriptedPrompter::new(vec![]);

        let err = acquire_source(&executor, &prompter, &target)
            .expect_err("network failure should be fatal");
        assert!(matches!(err, InstallerError::Git { operation, .. } if operation == "clone"));
    }

    #[test]
    fn update_source_pulls_in_the_install_directory() {
        let install = Utf8PathBuf::from("/home/user/.ghostapp");
        let executor = StubExecutor::new(vec![
            ExpectedCall::new("git", &["pull"], Ok(success_output())).in_dir(&install),
        ]);

        update_source(&executor, &install).expect("pull should succeed");
        executor.assert_finished();
    }
}
