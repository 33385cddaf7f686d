//! Environment document generation.
//!
//! The installed app reads its runtime configuration from a `.env` file of
//! `KEY="VALUE"` lines. The installer derives that file from the
//! `example.env` template shipped in the app source: every template key is
//! carried over in order, and exactly three derived keys are injected (the
//! signing secret, the data directory, and the database location).

use crate::error::{InstallerError, Result};
use crate::platform::InstallTarget;
use crate::secret::signing_secret;
use camino::Utf8Path;

/// Template file name inside the cloned app source.
pub const TEMPLATE_FILE_NAME: &str = "example.env";

/// Destination file name inside the install directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Key holding the generated signing secret.
pub const KEY_JWT_SECRET: &str = "NEXT_JWT_SECRET";

/// Key holding the application data directory.
pub const KEY_APP_DATA: &str = "GHOST_APP_DATA";

/// Key holding the database location.
pub const KEY_DB_PATH: &str = "DB_PATH";

/// An ordered key/value configuration document.
///
/// Order matches the source template; [`EnvDocument::set`] updates an
/// existing key in place and appends unknown keys, so no key ever appears
/// twice in the serialized output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDocument {
    entries: Vec<(String, String)>,
}

impl EnvDocument {
    /// Parses template text into an ordered document.
    ///
    /// Blank lines and `#` comments are skipped; values may carry one pair of
    /// surrounding single or double quotes, which are stripped. A key
    /// repeated in the template keeps its first position with the last value.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            doc.set(key.trim(), strip_quotes(value.trim()));
        }
        doc
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, updating in place when the key already exists
    /// and appending otherwise.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_owned();
        } else {
            self.entries.push((key.to_owned(), value.to_owned()));
        }
    }

    /// Number of entries in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the document as `KEY="VALUE"` lines in entry order.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push_str("\"\n");
        }
        out
    }
}

/// Strips one pair of matching surrounding quotes from a value.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Reads the template from the install directory, injects the three derived
/// keys, and writes the final `.env` file.
///
/// The write goes through a sibling temporary file followed by a rename so a
/// partially written `.env` is never observable.
///
/// # Errors
///
/// Returns [`InstallerError::EnvTemplate`] when the template cannot be read,
/// and an I/O error when the destination cannot be written.
pub fn configure(target: &InstallTarget) -> Result<()> {
    let template_path = target.install_path.join(TEMPLATE_FILE_NAME);
    let text =
        std::fs::read_to_string(template_path.as_std_path()).map_err(|e| {
            InstallerError::EnvTemplate {
                path: template_path.clone(),
                reason: e.to_string(),
            }
        })?;

    let mut doc = EnvDocument::parse(&text);
    doc.set(KEY_JWT_SECRET, &signing_secret());
    doc.set(KEY_APP_DATA, target.data_path.as_str());
    doc.set(KEY_DB_PATH, &target.database_path);

    write_atomic(&target.install_path.join(ENV_FILE_NAME), &doc)
}

/// Writes the document to `path` via write-then-rename in the same directory.
///
/// # Errors
///
/// Returns any I/O error from writing or renaming.
pub fn write_atomic(path: &Utf8Path, doc: &EnvDocument) -> Result<()> {
    let file_name = path.file_name().unwrap_or(ENV_FILE_NAME);
    let staged = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(staged.as_std_path(), doc.serialize())?;
    std::fs::rename(staged.as_std_path(), path.as_std_path())?;
    Ok(())
}
