//! Admin account collection and validation.
//!
//! The optional final stage of installation collects a display name, a
//! handle, and a password for the initial administrator. Each sub-flow is a
//! small retry loop: invalid input re-prompts with one specific message and
//! never aborts the installation.

use crate::error::Result;
use crate::output::{write_fatal, write_stderr_line};
use crate::prompt::Prompter;
use std::io::Write;

/// Special characters accepted (and one required) in passwords.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Characters stripped from handles.
const HANDLE_STRIPPED_CHARS: [char; 5] = ['@', ' ', '!', '/', '\\'];

/// A single violated password rule.
///
/// The variant order is the check order: when several rules are violated the
/// first failing rule determines the message shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    /// Shorter than [`PASSWORD_MIN_LEN`].
    TooShort,
    /// No uppercase letter.
    MissingUppercase,
    /// No lowercase letter.
    MissingLowercase,
    /// No digit.
    MissingDigit,
    /// No character from [`PASSWORD_SPECIAL_CHARS`].
    MissingSpecial,
    /// Contains a character outside letters, digits, and the special set.
    ForbiddenCharacter,
}

impl PasswordViolation {
    /// The message shown to the user for this violation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShort => "The password must be at least 8 characters long",
            Self::MissingUppercase => "The password must contain at least one uppercase letter",
            Self::MissingLowercase => "The password must contain at least one lowercase letter",
            Self::MissingDigit => "The password must contain at least one number",
            Self::MissingSpecial => {
                "The password must contain at least one special character (!@#$%^&*()_+-=[]{};':\"\\|,.<>/?)"
            }
            Self::ForbiddenCharacter => {
                "The password may only contain letters, numbers, and special characters"
            }
        }
    }
}

/// The validated administrator account, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    /// Time-ordered unique identifier.
    pub id: String,
    /// Normalized display name.
    pub name: String,
    /// Sanitized handle.
    pub handle: String,
    /// Salted adaptive hash of the chosen password.
    pub password_hash: String,
    /// Always `true`; this is the privileged initial account.
    pub is_admin: bool,
}

/// Validates a password candidate against the fixed policy.
///
/// Checks run in a fixed order and the first failing rule wins, so exactly
/// one message is reported per attempt.
///
/// # Errors
///
/// Returns the first [`PasswordViolation`] encountered.
pub fn validate_password(candidate: &str) -> std::result::Result<(), PasswordViolation> {
    if candidate.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordViolation::TooShort);
    }
    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordViolation::MissingUppercase);
    }
    if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordViolation::MissingLowercase);
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordViolation::MissingDigit);
    }
    if !candidate.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(PasswordViolation::MissingSpecial);
    }
    if candidate
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SPECIAL_CHARS.contains(c))
    {
        return Err(PasswordViolation::ForbiddenCharacter);
    }
    Ok(())
}

/// Normalizes a display name: internal whitespace collapses to single
/// spaces and each word is title-cased.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitizes a handle by stripping `@`, spaces, `!`, and slashes.
#[must_use]
pub fn sanitize_handle(raw: &str) -> String {
    raw.chars()
        .filter(|c| !HANDLE_STRIPPED_CHARS.contains(c))
        .collect()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

/// Collects and validates admin credentials interactively.
///
/// Runs the name, handle, and password sub-flows in order; each loops until
/// the input passes validation and, for name and handle, until the user
/// confirms the cleaned-up form. Returns the raw pieces; hashing and id
/// generation happen in [`build_account`].
///
/// # Errors
///
/// Returns an error only when a prompt itself fails; validation failures
/// re-prompt and never escape this function.
pub fn collect_credentials(
    prompter: &dyn Prompter,
    stderr: &mut dyn Write,
) -> Result<(String, String, String)> {
    let name = collect_name(prompter, stderr)?;
    let handle = collect_handle(prompter, stderr)?;
    let password = collect_password(prompter, stderr)?;
    Ok((name, handle, password))
}

/// Derives the final account record from validated credentials.
///
/// # Errors
///
/// Returns [`crate::error::InstallerError::PasswordHash`] if hashing fails.
pub fn build_account(name: String, handle: String, password: &str) -> Result<AdminAccount> {
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    Ok(AdminAccount {
        id: uuid::Uuid::now_v7().to_string(),
        name,
        handle,
        password_hash,
        is_admin: true,
    })
}

fn collect_name(prompter: &dyn Prompter, stderr: &mut dyn Write) -> Result<String> {
    loop {
        let raw = prompter.input("Name of the admin user")?;
        let normalized = normalize_name(&raw);
        if normalized.is_empty() {
            write_fatal(stderr, "The name cannot be empty");
            continue;
        }
        if prompter.confirm(&format!("Use \"{normalized}\" as the admin name?"), true)? {
            return Ok(normalized);
        }
    }
}

fn collect_handle(prompter: &dyn Prompter, stderr: &mut dyn Write) -> Result<String> {
    loop {
        let raw = prompter.input("Username of the admin user")?;
        let sanitized = sanitize_handle(&raw);
        if sanitized.is_empty() {
            write_fatal(stderr, "The username cannot be empty");
            continue;
        }
        if prompter.confirm(&format!("Use \"{sanitized}\" as the admin username?"), true)? {
            return Ok(sanitized);
        }
    }
}

fn collect_password(prompter: &dyn Prompter, stderr: &mut dyn Write) -> Result<String> {
    loop {
        let first = prompter.password("Password of the admin user")?;
        if let Err(violation) = validate_password(&first) {
            write_fatal(stderr, violation.message());
            continue;
        }
        let second = prompter.password("Confirm the password")?;
        if first != second {
            // Both entries are discarded; the whole sub-flow restarts.
            write_fatal(stderr, "The passwords do not match");
            continue;
        }
        write_stderr_line(stderr, "");
        return Ok(first);
    }
}
