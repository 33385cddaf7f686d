//! Platform detection and install-target resolution.
//!
//! This module identifies the host platform, derives the OS-conventional
//! default install and data directories, and bundles the resolved locations
//! into the immutable [`InstallTarget`] consumed by every later stage.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;
use std::fmt;

/// Directory name used for the application on each platform.
const APP_DIR_WINDOWS: &str = "GhostApp";
const APP_DIR_LINUX: &str = ".ghostapp";

/// File name of the application's SQLite database.
pub const DB_FILE_NAME: &str = "database.db";

/// Scheme prefix the installed app's database client expects on `DB_PATH`.
pub const DB_SCHEME: &str = "file:";

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Linux distributions.
    Linux,
}

impl Platform {
    /// Detects the host platform.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnsupportedPlatform`] on any other OS.
    pub fn detect() -> Result<Self> {
        if cfg!(target_os = "windows") {
            Ok(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Ok(Self::Linux)
        } else {
            Err(InstallerError::UnsupportedPlatform {
                os: std::env::consts::OS.to_owned(),
            })
        }
    }

    /// Directory name the app installs under (`GhostApp` / `.ghostapp`).
    #[must_use]
    pub const fn app_dir_name(self) -> &'static str {
        match self {
            Self::Windows => APP_DIR_WINDOWS,
            Self::Linux => APP_DIR_LINUX,
        }
    }

    /// Default installation directory presented to the user.
    ///
    /// - Windows: `%ProgramFiles%\GhostApp`
    /// - Linux: `~/.ghostapp`
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::DataDir`] if the base location cannot be
    /// resolved from the environment.
    pub fn default_install_dir(self) -> Result<Utf8PathBuf> {
        match self {
            Self::Windows => {
                let program_files =
                    std::env::var("ProgramFiles").map_err(|_| InstallerError::DataDir {
                        reason: "ProgramFiles is not set".to_owned(),
                    })?;
                Ok(Utf8PathBuf::from(program_files).join(APP_DIR_WINDOWS))
            }
            Self::Linux => home_dir().map(|home| home.join(APP_DIR_LINUX)),
        }
    }

    /// Per-user application data directory.
    ///
    /// - Windows: `%APPDATA%\GhostApp`
    /// - Linux: `~/.config/.ghostapp`
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::DataDir`] if the base location cannot be
    /// resolved from the environment.
    pub fn data_dir(self) -> Result<Utf8PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| InstallerError::DataDir {
            reason: "could not determine the user configuration directory".to_owned(),
        })?;
        let base = Utf8PathBuf::try_from(base).map_err(|e| InstallerError::DataDir {
            reason: format!("configuration directory is not valid UTF-8: {e}"),
        })?;
        Ok(base.join(self.app_dir_name()))
    }

    /// Elevation hint used in permission-denied diagnostics.
    #[must_use]
    pub const fn elevation_hint(self) -> &'static str {
        match self {
            Self::Windows => "as administrator",
            Self::Linux => "with sudo",
        }
    }

    /// Download URL for git, keyed by platform.
    #[must_use]
    pub const fn git_download_url(self) -> &'static str {
        match self {
            Self::Windows => "https://git-scm.com/download/win",
            Self::Linux => "https://git-scm.com/download/linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
        };
        write!(f, "{name}")
    }
}

/// The resolved installation target.
///
/// Created once after path resolution and immutable afterwards; every later
/// stage reads from it and nothing mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// Detected host platform.
    pub platform: Platform,
    /// Directory the application source is installed into.
    pub install_path: Utf8PathBuf,
    /// Directory holding the application's persistent state.
    pub data_path: Utf8PathBuf,
    /// Database location as understood by the app's data-access layer
    /// (a `file:`-prefixed path under `data_path`).
    pub database_path: String,
}

impl InstallTarget {
    /// Builds the target from the confirmed install path, deriving the data
    /// and database locations from platform conventions.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::DataDir`] if the data directory cannot be
    /// resolved.
    pub fn new(platform: Platform, install_path: Utf8PathBuf) -> Result<Self> {
        let data_path = platform.data_dir()?;
        let database_path = format!("{DB_SCHEME}{}", data_path.join(DB_FILE_NAME));
        Ok(Self {
            platform,
            install_path,
            data_path,
            database_path,
        })
    }
}

/// Resolves the user's home directory as a UTF-8 path.
fn home_dir() -> Result<Utf8PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| InstallerError::DataDir {
        reason: "could not determine the home directory".to_owned(),
    })?;
    Utf8PathBuf::try_from(home).map_err(|e| InstallerError::DataDir {
        reason: format!("home directory is not valid UTF-8: {e}"),
    })
}
