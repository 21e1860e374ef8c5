//! Font group repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own `font_groups` and the `font_group_items` membership table.
//! - Keep a group row and its membership rows consistent.
//!
//! # Invariants
//! - Create, update and delete each run in one `UnitOfWork`; a failure at
//!   any statement leaves the previous state untouched.
//! - Update replaces the full membership set instead of diffing it.
//! - Membership rows reference fonts by name.

use super::{exists_by_name, map_unique_violation, RepoError, RepoResult};
use crate::db::UnitOfWork;
use crate::model::font_group::{FontGroup, FontGroupId, FontGroupRecord, GroupFont};
use crate::sanitize::sanitize_text;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

/// Repository interface for font groups and their memberships.
pub trait FontGroupRepository {
    /// Inserts the group and one membership row per distinct font name.
    fn create_group(&self, name: &str, font_names: &[String]) -> RepoResult<FontGroup>;
    fn group_exists(&self, name: &str) -> RepoResult<bool>;
    /// Lists groups newest first, each with members joined to `fonts`.
    fn list_groups(&self) -> RepoResult<Vec<FontGroupRecord>>;
    /// Renames (when `new_name` differs) and replaces all memberships.
    fn update_group(
        &self,
        old_name: &str,
        new_name: &str,
        font_names: &[String],
    ) -> RepoResult<()>;
    /// Deletes memberships, then the group row.
    fn delete_group(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed font group repository.
pub struct SqliteFontGroupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFontGroupRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FontGroupRepository for SqliteFontGroupRepository<'_> {
    fn create_group(&self, name: &str, font_names: &[String]) -> RepoResult<FontGroup> {
        let name = sanitize_text(name);
        let uow = UnitOfWork::begin(self.conn)?;

        uow.execute("INSERT INTO font_groups (name) VALUES (?1);", [name.as_str()])
            .map_err(|err| map_unique_violation(err, &name))?;
        let group_id = uow.last_insert_rowid();
        insert_memberships(&uow, group_id, font_names)?;

        let group = uow.query_row(
            "SELECT id, name, created_at FROM font_groups WHERE id = ?1;",
            [group_id],
            |row| {
                Ok(FontGroup {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    created_at: row.get("created_at")?,
                })
            },
        )?;
        uow.commit()?;
        Ok(group)
    }

    fn group_exists(&self, name: &str) -> RepoResult<bool> {
        exists_by_name(self.conn, "font_groups", name)
    }

    fn list_groups(&self) -> RepoResult<Vec<FontGroupRecord>> {
        let mut group_stmt = self.conn.prepare(
            "SELECT id, name
             FROM font_groups
             ORDER BY created_at DESC, id DESC;",
        )?;
        let mut member_stmt = self.conn.prepare(
            "SELECT i.font_name, f.file_path
             FROM font_group_items i
             INNER JOIN fonts f ON f.name = i.font_name
             WHERE i.group_id = ?1
             ORDER BY i.rowid ASC;",
        )?;

        let mut groups = Vec::new();
        let mut rows = group_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: FontGroupId = row.get("id")?;
            let fonts = member_stmt
                .query_map([id], |member| {
                    Ok(GroupFont {
                        name: member.get(0)?,
                        file_path: member.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(FontGroupRecord {
                id,
                name: row.get("name")?,
                fonts,
            });
        }
        Ok(groups)
    }

    fn update_group(
        &self,
        old_name: &str,
        new_name: &str,
        font_names: &[String],
    ) -> RepoResult<()> {
        let uow = UnitOfWork::begin(self.conn)?;
        let group_id = find_group_id(&uow, old_name)?;

        if new_name != old_name {
            let new_name = sanitize_text(new_name);
            uow.execute(
                "UPDATE font_groups SET name = ?2 WHERE id = ?1;",
                params![group_id, new_name],
            )
            .map_err(|err| map_unique_violation(err, &new_name))?;
        }

        uow.execute(
            "DELETE FROM font_group_items WHERE group_id = ?1;",
            [group_id],
        )?;
        insert_memberships(&uow, group_id, font_names)?;

        uow.commit()?;
        Ok(())
    }

    fn delete_group(&self, name: &str) -> RepoResult<()> {
        let uow = UnitOfWork::begin(self.conn)?;
        let group_id = find_group_id(&uow, name)?;

        uow.execute(
            "DELETE FROM font_group_items WHERE group_id = ?1;",
            [group_id],
        )?;
        uow.execute("DELETE FROM font_groups WHERE id = ?1;", [group_id])?;

        uow.commit()?;
        Ok(())
    }
}

fn find_group_id(conn: &Connection, name: &str) -> RepoResult<FontGroupId> {
    conn.query_row(
        "SELECT id FROM font_groups WHERE name = ?1 LIMIT 1;",
        [name],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| RepoError::GroupNotFound(name.to_string()))
}

fn insert_memberships(
    conn: &Connection,
    group_id: FontGroupId,
    font_names: &[String],
) -> RepoResult<()> {
    let mut seen = HashSet::new();
    let mut stmt = conn.prepare(
        "INSERT INTO font_group_items (group_id, font_name) VALUES (?1, ?2);",
    )?;
    for font_name in font_names {
        if !seen.insert(font_name.as_str()) {
            continue;
        }
        if let Err(err) = stmt.execute(params![group_id, font_name]) {
            warn!(
                "event=group_membership_insert module=repo status=error group_id={} error={}",
                group_id, err
            );
            return Err(err.into());
        }
    }
    Ok(())
}
