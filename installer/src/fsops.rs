//! Filesystem failure classification and conflict resolution.
//!
//! Source acquisition and data-directory provisioning share one
//! failure-handling policy: a denied operation is fatal with an elevation
//! hint, an existing target may be destructively overwritten after explicit
//! confirmation, and anything else is fatal with a generic diagnostic. This
//! module holds the single classification function and the reusable
//! [`resolve_conflict`] policy both call sites use.

use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use crate::prompt::Prompter;
use camino::Utf8Path;
use std::io::ErrorKind;

/// Three-way classification of a failed filesystem or tool operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The OS denied the operation; elevation may help.
    PermissionDenied,
    /// The target already exists; overwriting is a user decision.
    AlreadyExists,
    /// Anything else; fatal with a generic diagnostic.
    Other,
}

/// Known stderr fragments indicating a denied operation, per target OS.
const PERMISSION_PATTERNS: [&str; 3] = [
    "permission denied",
    "access is denied",
    "operation not permitted",
];

/// Known stderr fragments indicating an existing target.
const EXISTS_PATTERNS: [&str; 2] = ["already exists", "file exists"];

/// Classifies an I/O error from a direct filesystem call.
#[must_use]
pub fn classify_io_error(error: &std::io::Error) -> FailureKind {
    match error.kind() {
        ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
        ErrorKind::AlreadyExists => FailureKind::AlreadyExists,
        _ => FailureKind::Other,
    }
}

/// Classifies an external tool's stderr text.
///
/// Matching is case-insensitive against a small set of known patterns per
/// target OS; unrecognised text classifies as [`FailureKind::Other`].
#[must_use]
pub fn classify_stderr(stderr: &str) -> FailureKind {
    let lowered = stderr.to_lowercase();
    if PERMISSION_PATTERNS.iter().any(|p| lowered.contains(p)) {
        return FailureKind::PermissionDenied;
    }
    if EXISTS_PATTERNS.iter().any(|p| lowered.contains(p)) {
        return FailureKind::AlreadyExists;
    }
    FailureKind::Other
}

/// A failed creation attempt, classified for [`resolve_conflict`].
///
/// Pairs the three-way classification with the error to surface when the
/// policy cannot recover, so the policy works for direct I/O calls and for
/// external tools that only report failures through stderr text.
#[derive(Debug)]
pub struct ClassifiedFailure {
    /// Classification driving the policy branch.
    pub kind: FailureKind,
    /// Error reported when the policy gives up.
    pub error: InstallerError,
}

/// Wraps a raw I/O error for use in [`resolve_conflict`] closures.
#[must_use]
pub fn io_failure(error: std::io::Error) -> ClassifiedFailure {
    ClassifiedFailure {
        kind: classify_io_error(&error),
        error: error.into(),
    }
}

/// Creates a filesystem target, resolving an already-exists conflict
/// interactively.
///
/// Runs `create`; on success returns immediately, so a non-existing target
/// never prompts. When creation fails because the target exists, the user is
/// asked exactly once whether to overwrite: confirming removes the existing
/// tree and retries `create` once, declining fails with
/// [`InstallerError::TargetExists`]. Permission failures and unclassified
/// failures are fatal without any prompt, as is any retry failure (the
/// conflict branch is never re-entered).
///
/// # Errors
///
/// Returns [`InstallerError::PermissionDenied`], [`InstallerError::TargetExists`],
/// or the failure's own error as described above.
pub fn resolve_conflict<F>(
    path: &Utf8Path,
    platform: Platform,
    action: &'static str,
    prompter: &dyn Prompter,
    create: F,
) -> Result<()>
where
    F: Fn() -> std::result::Result<(), ClassifiedFailure>,
{
    let Err(failure) = create() else {
        return Ok(());
    };

    match failure.kind {
        FailureKind::PermissionDenied => Err(InstallerError::PermissionDenied {
            action,
            hint: platform.elevation_hint(),
        }),
        FailureKind::AlreadyExists => {
            log::debug!("target {path} already exists; asking for confirmation");
            if overwrite_confirmed(path, prompter)? {
                std::fs::remove_dir_all(path.as_std_path())?;
                create().map_err(|retry| match retry.kind {
                    FailureKind::PermissionDenied => InstallerError::PermissionDenied {
                        action,
                        hint: platform.elevation_hint(),
                    },
                    FailureKind::AlreadyExists | FailureKind::Other => retry.error,
                })
            } else {
                Err(InstallerError::TargetExists {
                    path: path.to_owned(),
                })
            }
        }
        FailureKind::Other => Err(failure.error),
    }
}

/// Asks the user whether an existing target may be destroyed and recreated.
///
/// # Errors
///
/// Returns an error if the prompt itself fails.
pub fn overwrite_confirmed(path: &Utf8Path, prompter: &dyn Prompter) -> Result<bool> {
    prompter.confirm(
        &format!(
            "Directory {path} already exists, do you want to overwrite it? \
             (you will lose all data in the directory)"
        ),
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MockPrompter;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        (temp, path)
    }

    fn create_all(path: &Utf8Path) -> impl Fn() -> std::result::Result<(), ClassifiedFailure> {
        let path = path.to_owned();
        move || {
            let run = || {
                std::fs::create_dir(path.as_std_path())?;
                std::fs::create_dir(path.join("storage").as_std_path())
            };
            run().map_err(io_failure)
        }
    }

    #[rstest]
    #[case::permission("mkdir: cannot create directory: Permission denied", FailureKind::PermissionDenied)]
    #[case::windows_permission("Access is denied.", FailureKind::PermissionDenied)]
    #[case::exists("fatal: destination path 'x' already exists and is not an empty directory", FailureKind::AlreadyExists)]
    #[case::mkdir_exists("mkdir: File exists", FailureKind::AlreadyExists)]
    #[case::other("fatal: repository not found", FailureKind::Other)]
    fn classify_stderr_matches_known_patterns(#[case] text: &str, #[case] expected: FailureKind) {
        assert_eq!(classify_stderr(text), expected);
    }

    #[test]
    fn classify_io_error_maps_error_kinds() {
        let denied = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let exists = std::io::Error::new(ErrorKind::AlreadyExists, "exists");
        let other = std::io::Error::other("boom");
        assert_eq!(classify_io_error(&denied), FailureKind::PermissionDenied);
        assert_eq!(classify_io_error(&exists), FailureKind::AlreadyExists);
        assert_eq!(classify_io_error(&other), FailureKind::Other);
    }

    #[test]
    fn resolve_conflict_creates_missing_target_without_prompting() {
        let (_temp, base) = utf8_temp_dir();
        let target = base.join("data");
        let prompter = MockPrompter::new();

        resolve_conflict(
            &target,
            Platform::Linux,
            "creating the data directory",
            &prompter,
            create_all(&target),
        )
        .expect("creation should succeed");

        assert!(target.join("storage").is_dir());
    }

    #[test]
    fn resolve_conflict_prompts_exactly_once_and_recreates_on_confirmation() {
        let (_temp, base) = utf8_temp_dir();
        let target = base.join("data");
        std::fs::create_dir(target.as_std_path()).expect("failed to pre-create target");
        std::fs::write(target.join("stale.txt").as_std_path(), b"old")
            .expect("failed to write stale file");

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .times(1)
            .returning(|_, _| Ok(true));

        resolve_conflict(
            &target,
            Platform::Linux,
            "creating the data directory",
            &prompter,
            create_all(&target),
        )
        .expect("overwrite should succeed");

        assert!(target.join("storage").is_dir());
        assert!(!target.join("stale.txt").exists());
    }

    #[test]
    fn resolve_conflict_leaves_target_untouched_when_declined() {
        let (_temp, base) = utf8_temp_dir();
        let target = base.join("data");
        std::fs::create_dir(target.as_std_path()).expect("failed to pre-create target");
        std::fs::write(target.join("stale.txt").as_std_path(), b"old")
            .expect("failed to write stale file");

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .times(1)
            .returning(|_, _| Ok(false));

        let err = resolve_conflict(
            &target,
            Platform::Linux,
            "creating the data directory",
            &prompter,
            create_all(&target),
        )
        .expect_err("declined overwrite should fail");

        assert!(matches!(err, InstallerError::TargetExists { path } if path == target));
        assert!(target.join("stale.txt").exists());
    }

    #[test]
    fn resolve_conflict_handles_tool_reported_conflicts() {
        let (_temp, base) = utf8_temp_dir();
        let target = base.join("clone-target");
        std::fs::create_dir(target.as_std_path()).expect("failed to pre-create target");

        // Simulates a tool that only reports the conflict through stderr.
        let create = || {
            Err(ClassifiedFailure {
                kind: classify_stderr("fatal: destination path already exists"),
                error: InstallerError::Git {
                    operation: "clone",
                    message: "destination path already exists".to_owned(),
                },
            })
        };

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .times(1)
            .returning(|_, _| Ok(false));

        let err = resolve_conflict(
            &target,
            Platform::Linux,
            "downloading the Ghost app",
            &prompter,
            create,
        )
        .expect_err("declined overwrite should fail");

        assert!(matches!(err, InstallerError::TargetExists { path } if path == target));
        assert!(target.exists());
    }

    #[test]
    fn resolve_conflict_is_idempotent_given_the_same_answer() {
        let (_temp, base) = utf8_temp_dir();
        let target = base.join("data");

        for _ in 0..2 {
            let mut prompter = MockPrompter::new();
            prompter.expect_confirm().returning(|_, _| Ok(true));
            resolve_conflict(
                &target,
                Platform::Linux,
                "creating the data directory",
                &prompter,
                create_all(&target),
            )
            .expect("creation should succeed");
            assert!(target.join("storage").is_dir());
        }
    }
}
