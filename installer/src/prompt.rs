//! Interactive prompting.
//!
//! This module defines the [`Prompter`] abstraction over terminal prompts so
//! that interactive flows can be exercised in tests with scripted answers.
//! The real implementation, [`TerminalPrompter`], is backed by `dialoguer`.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

/// Abstraction over the interactive prompts used by the installer.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Asks a yes/no question and returns the answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Prompts for a line of free text (empty input is permitted; callers
    /// validate).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Prompts for a masked secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails.
    fn password(&self, prompt: &str) -> Result<String>;

    /// Lets the user browse the filesystem and pick a directory, starting
    /// from `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails or a directory
    /// listing cannot be read.
    fn select_directory(&self, start: &Utf8Path) -> Result<Utf8PathBuf>;
}

/// Terminal-backed [`Prompter`] implementation.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Creates a prompter with the default colourful theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Menu entry used by the directory browser to accept the current directory.
const CHOOSE_HERE: &str = "[use this directory]";
/// Menu entry used by the directory browser to go up one level.
const GO_UP: &str = "..";

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?)
    }

    fn select_directory(&self, start: &Utf8Path) -> Result<Utf8PathBuf> {
        let mut current = nearest_existing_dir(start);

        loop {
            let subdirs = list_subdirectories(&current)?;
            let mut items = vec![CHOOSE_HERE.to_owned(), GO_UP.to_owned()];
            items.extend(subdirs.iter().cloned());

            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("Select a dir ({current})"))
                .items(&items)
                .default(0)
                .interact()?;

            match choice {
                0 => return Ok(current),
                1 => {
                    if let Some(parent) = current.parent() {
                        current = parent.to_owned();
                    }
                }
                n => {
                    // Offsets 2.. map onto the subdirectory listing.
                    if let Some(name) = subdirs.get(n - 2) {
                        current = current.join(name);
                    }
                }
            }
        }
    }
}

/// Walks up from `start` until an existing directory is found, falling back
/// to the filesystem root.
fn nearest_existing_dir(start: &Utf8Path) -> Utf8PathBuf {
    let mut candidate = start;
    loop {
        if candidate.is_dir() {
            return candidate.to_owned();
        }
        match candidate.parent() {
            Some(parent) => candidate = parent,
            None => return candidate.to_owned(),
        }
    }
}

/// Lists the names of subdirectories of `dir`, sorted for stable display.
fn list_subdirectories(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        (temp, path)
    }

    #[test]
    fn nearest_existing_dir_returns_existing_path_unchanged() {
        let (_temp, path) = utf8_temp_dir();
        assert_eq!(nearest_existing_dir(&path), path);
    }

    #[test]
    fn nearest_existing_dir_falls_back_to_parent() {
        let (_temp, path) = utf8_temp_dir();
        let missing = path.join("not-created-yet");
        assert_eq!(nearest_existing_dir(&missing), path);
    }

    #[test]
    fn list_subdirectories_ignores_files_and_sorts() {
        let (_temp, path) = utf8_temp_dir();
        std::fs::create_dir(path.join("beta")).expect("failed to create dir");
        std::fs::create_dir(path.join("alpha")).expect("failed to create dir");
        std::fs::write(path.join("file.txt"), b"x").expect("failed to write file");

        let names = list_subdirectories(&path).expect("listing failed");
        assert_eq!(names, vec!["alpha".to_owned(), "beta".to_owned()]);
    }
}
