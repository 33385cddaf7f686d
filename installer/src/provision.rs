//! Data directory provisioning.
//!
//! Creates the app's persistent-state tree: the data root plus `storage` and
//! `storage/tools` subdirectories. Conflicts with a previous installation
//! are resolved through the same policy as source acquisition.

use crate::error::Result;
use crate::fsops::{io_failure, resolve_conflict};
use crate::platform::InstallTarget;
use crate::prompt::Prompter;
use camino::Utf8Path;

/// Subdirectories created under the data root.
const STORAGE_DIR: &str = "storage";
const TOOLS_DIR: &str = "tools";

/// Creates the data directory tree for the installation.
///
/// Idempotent for a given confirmed answer: a second run with the same
/// confirmation yields the same final directory shape.
///
/// # Errors
///
/// Propagates the conflict-resolution policy's errors (permission denied,
/// declined overwrite, or any other I/O failure).
pub fn provision_data_dirs(target: &InstallTarget, prompter: &dyn Prompter) -> Result<()> {
    let data_path = target.data_path.clone();
    resolve_conflict(
        &target.data_path,
        target.platform,
        "creating the data directory",
        prompter,
        move || create_tree(&data_path).map_err(io_failure),
    )
}

/// Creates the full subtree, failing with `AlreadyExists` when the root is
/// already present so the conflict policy can take over.
fn create_tree(data_path: &Utf8Path) -> std::io::Result<()> {
    std::fs::create_dir(data_path.as_std_path())?;
    let storage = data_path.join(STORAGE_DIR);
    std::fs::create_dir(storage.as_std_path())?;
    std::fs::create_dir(storage.join(TOOLS_DIR).as_std_path())?;
    Ok(())
}
