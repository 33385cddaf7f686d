//! Host prerequisite validation.
//!
//! Before anything touches the filesystem the installer verifies three
//! environment facts: the host OS is supported, the Node.js runtime is recent
//! enough to run the app, and git is available for source acquisition. These
//! are facts outside the user's control within a run, so failures are fatal
//! with a remediation message and are never retried.

use crate::error::{InstallerError, Result};
use crate::exec::CommandExecutor;
use crate::platform::Platform;

/// Minimum supported Node.js version.
pub const MIN_NODE_VERSION: (u32, u32) = (20, 11);

/// Minimum version rendered for diagnostics.
const MIN_NODE_VERSION_TEXT: &str = "20.11.0";

/// Download URL for the Node.js runtime.
const NODE_DOWNLOAD_URL: &str = "https://nodejs.org/en/download";

/// Versions of the tools found on the host, reported back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereqReport {
    /// Node.js version string as reported by `node --version`.
    pub node_version: String,
    /// Git version line as reported by `git --version`.
    pub git_version: String,
}

/// Validates every host prerequisite, returning the detected tool versions.
///
/// # Errors
///
/// Returns [`InstallerError::ToolMissing`] when node or git cannot be run,
/// and [`InstallerError::RuntimeTooOld`] when the Node.js version is below
/// [`MIN_NODE_VERSION`].
pub fn check_prerequisites(
    executor: &dyn CommandExecutor,
    platform: Platform,
) -> Result<PrereqReport> {
    let node_version = check_node(executor)?;
    let git_version = check_git(executor, platform)?;
    Ok(PrereqReport {
        node_version,
        git_version,
    })
}

fn check_node(executor: &dyn CommandExecutor) -> Result<String> {
    let missing = || InstallerError::ToolMissing {
        tool: "Node.js",
        download_url: NODE_DOWNLOAD_URL.to_owned(),
    };

    let output = executor
        .run("node", &["--version"], None)
        .map_err(|_| missing())?;
    if !output.status.success() {
        return Err(missing());
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    let (major, minor) = parse_node_version(&version).ok_or_else(missing)?;

    if (major, minor) < MIN_NODE_VERSION {
        return Err(InstallerError::RuntimeTooOld {
            found: version.trim_start_matches('v').to_owned(),
            minimum: MIN_NODE_VERSION_TEXT,
        });
    }

    Ok(version)
}

fn check_git(executor: &dyn CommandExecutor, platform: Platform) -> Result<String> {
    let missing = || InstallerError::ToolMissing {
        tool: "git",
        download_url: platform.git_download_url().to_owned(),
    };

    let output = executor
        .run("git", &["--version"], None)
        .map_err(|_| missing())?;
    if !output.status.success() {
        return Err(missing());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

/// Parses `v<major>.<minor>.<patch>` (the leading `v` is optional) into the
/// major and minor components.
fn parse_node_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().trim_start_matches('v').split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}
