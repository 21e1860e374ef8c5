//! Font catalog database: connection bootstrap, schema, write scopes.
//!
//! The catalog holds three tables (`fonts`, `font_groups`,
//! `font_group_items`); font bytes live in the blob store, never here.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON` and the latest
//!   schema applied; membership rows cannot name a missing font or group.
//! - A catalog written by a newer release is refused rather than downgraded.
//! - Multi-statement writes go through [`UnitOfWork`].

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod unit_of_work;

pub use open::{open_db, open_db_in_memory};
pub use unit_of_work::UnitOfWork;

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the font catalog.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a pragma, migration or statement.
    Sqlite(rusqlite::Error),
    /// `PRAGMA user_version` is ahead of the migrations this build ships.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "font catalog sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "font catalog schema v{db_version} comes from a newer release; \
                 this build reads up to v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
