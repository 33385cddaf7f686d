//! Error types for the Ghost installer CLI.
//!
//! This module defines semantic error variants that provide actionable guidance
//! to users when installation fails. Each error includes recovery hints where
//! applicable.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during installation or lifecycle commands.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The host operating system is not supported.
    #[error("Ghost app is only supported on Windows and Linux at the moment (detected: {os})")]
    UnsupportedPlatform {
        /// The operating system that was detected.
        os: String,
    },

    /// The installed Node.js runtime is older than the required minimum.
    #[error("Ghost app requires Node.js v{minimum} or higher (found {found})")]
    RuntimeTooOld {
        /// The version string reported by the installed runtime.
        found: String,
        /// The minimum supported version.
        minimum: &'static str,
    },

    /// A required external tool was not found on the host.
    #[error("Ghost app requires {tool} to be installed; please install it from {download_url} and try again")]
    ToolMissing {
        /// Name of the missing tool.
        tool: &'static str,
        /// Download URL appropriate for the detected platform.
        download_url: String,
    },

    /// A filesystem or process operation was denied by the OS.
    #[error("Permission denied while {action}; try running the command {hint}")]
    PermissionDenied {
        /// The operation that was denied (e.g. "cloning the repository").
        action: &'static str,
        /// Platform-specific elevation hint.
        hint: &'static str,
    },

    /// The target path already exists and the user declined to overwrite it.
    #[error("directory {path} already exists")]
    TargetExists {
        /// The conflicting path.
        path: Utf8PathBuf,
    },

    /// A git operation failed for a reason other than permissions or conflicts.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed (clone, pull, etc.).
        operation: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A build pipeline step exited with a non-zero status.
    #[error("{step} failed: {message}")]
    PipelineStep {
        /// Human-readable name of the failing step.
        step: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The environment template could not be read or parsed.
    #[error("could not process environment template at {path}: {reason}")]
    EnvTemplate {
        /// Path to the template file.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A platform-conventional directory could not be resolved.
    #[error("could not resolve a platform directory: {reason}")]
    DataDir {
        /// Description of why resolution failed.
        reason: String,
    },

    /// No install receipt was found; the app has not been installed.
    #[error("Ghost app is not installed on this machine; please run `ghost install` first")]
    NotInstalled,

    /// The install receipt exists but could not be parsed.
    #[error("invalid install receipt at {path}: {reason}")]
    InvalidReceipt {
        /// Path to the receipt file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// Hashing the admin password failed.
    #[error("failed to hash the admin password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Writing the admin record to the application database failed.
    #[error("failed to write the admin account to the database: {0}")]
    Store(#[from] rusqlite::Error),

    /// An interactive prompt failed (e.g. the terminal was closed).
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
