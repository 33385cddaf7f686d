//! Install receipt persistence.
//!
//! A successful install records where the app lives in a small TOML file
//! under the user's configuration directory. Lifecycle commands (`start`,
//! `update`, `stop`, `uninstall`) read the receipt instead of relying on
//! ambient environment state, so they work from any shell.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Directory under the config dir holding installer state.
const RECEIPT_DIR: &str = "ghost-installer";

/// Receipt file name.
const RECEIPT_FILE: &str = "install.toml";

/// Record of a completed installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    /// Directory the application source was installed into.
    pub install_path: Utf8PathBuf,
    /// Directory holding the application's persistent state.
    pub data_path: Utf8PathBuf,
    /// Database location as understood by the app's data-access layer.
    pub database_path: String,
}

impl InstallReceipt {
    /// Loads the receipt for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::NotInstalled`] when no receipt exists and
    /// [`InstallerError::InvalidReceipt`] when one exists but cannot be
    /// parsed.
    pub fn load() -> Result<Self> {
        let path = receipt_path()?;
        let text = match std::fs::read_to_string(path.as_std_path()) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(InstallerError::NotInstalled);
            }
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|e| InstallerError::InvalidReceipt {
            path,
            reason: e.to_string(),
        })
    }

    /// Writes the receipt, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = receipt_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent.as_std_path())?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| InstallerError::InvalidReceipt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(path.as_std_path(), text)?;
        Ok(())
    }

    /// Removes the receipt. Missing receipts are not an error so uninstall
    /// stays idempotent.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for failures other than the file being absent.
    pub fn remove() -> Result<()> {
        let path = receipt_path()?;
        match std::fs::remove_file(path.as_std_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Location of the receipt file for the current user.
fn receipt_path() -> Result<Utf8PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| InstallerError::DataDir {
        reason: "could not determine the user configuration directory".to_owned(),
    })?;
    let base = Utf8PathBuf::try_from(base).map_err(|e| InstallerError::DataDir {
        reason: format!("configuration directory is not valid UTF-8: {e}"),
    })?;
    Ok(base.join(RECEIPT_DIR).join(RECEIPT_FILE))
}
