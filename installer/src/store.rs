//! Admin account persistence.
//!
//! Writes the initial administrator directly into the app's SQLite database.
//! The connection is scoped to the single insert: opened, used, and closed
//! within [`insert_admin`], whatever the outcome.

use crate::admin::AdminAccount;
use crate::error::Result;
use crate::platform::DB_SCHEME;
use rusqlite::Connection;

/// Schema for the user table, matching what the app's migrations create.
/// Applied idempotently in case the account is written before the app's
/// first migration run touches the file.
const CREATE_USER_TABLE: &str = "CREATE TABLE IF NOT EXISTS User (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    admin INTEGER NOT NULL DEFAULT 0
)";

const INSERT_ADMIN: &str =
    "INSERT INTO User (id, name, username, password, admin) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Inserts the admin account into the database at `database_path`.
///
/// `database_path` is the app-facing location and may carry the `file:`
/// scheme prefix, which is stripped before opening.
///
/// # Errors
///
/// Returns [`crate::error::InstallerError::Store`] if the database cannot be
/// opened or the insert fails (including a duplicate username).
pub fn insert_admin(database_path: &str, account: &AdminAccount) -> Result<()> {
    let path = database_path
        .strip_prefix(DB_SCHEME)
        .unwrap_or(database_path);
    let conn = Connection::open(path)?;
    conn.execute(CREATE_USER_TABLE, [])?;
    conn.execute(
        INSERT_ADMIN,
        rusqlite::params![
            account.id,
            account.name,
            account.handle,
            account.password_hash,
            account.is_admin,
        ],
    )?;
    Ok(())
}
