//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Multi-statement writes run inside one `UnitOfWork`.
//! - Repository APIs return semantic errors (`DuplicateName`,
//!   `GroupNotFound`) in addition to DB transport errors.

use crate::db::DbError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod font_group_repo;
pub mod font_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by font and font group persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A UNIQUE name constraint rejected the write.
    DuplicateName(String),
    /// No group row matched the given name.
    GroupNotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "name already taken: `{name}`"),
            Self::GroupNotFound(name) => write!(f, "font group not found: `{name}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateName(_) => None,
            Self::GroupNotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a UNIQUE violation to `DuplicateName`, other errors unchanged.
///
/// Foreign key violations share SQLite's constraint error code, so the
/// extended code is checked.
pub(crate) fn map_unique_violation(err: rusqlite::Error, name: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateName(name.to_string())
        }
        _ => err.into(),
    }
}

pub(crate) fn exists_by_name(conn: &Connection, table: &str, name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE name = ?1);"),
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
