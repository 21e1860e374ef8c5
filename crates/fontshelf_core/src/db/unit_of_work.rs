//! Scoped multi-statement write transaction.
//!
//! # Invariants
//! - Work is visible to other connections only after `commit()`.
//! - Dropping an uncommitted unit of work rolls every statement back,
//!   including on early `?` returns.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::ops::Deref;

/// One all-or-nothing unit of work over a shared connection.
///
/// Begins with `IMMEDIATE` behavior so the write lock is taken up front and
/// concurrent writers queue on `busy_timeout` instead of failing mid-way.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> UnitOfWork<'conn> {
    /// Opens a new unit of work on `conn`.
    ///
    /// Repositories hold `&Connection`, so the unchecked constructor is used;
    /// nested units of work on one connection fail with a SQLite error.
    pub fn begin(conn: &'conn Connection) -> rusqlite::Result<Self> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        Ok(Self { tx })
    }

    /// Commits all statements executed in this unit of work.
    pub fn commit(self) -> rusqlite::Result<()> {
        self.tx.commit()
    }
}

impl Deref for UnitOfWork<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.tx
    }
}
