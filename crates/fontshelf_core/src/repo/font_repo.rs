//! Font repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the `fonts` table: create, lookup, list and guarded delete.
//!
//! # Invariants
//! - Names and paths are sanitized before insert.
//! - A font referenced by any group membership is never deleted.
//! - The repository never touches blobs; callers remove them after a
//!   confirmed row delete.

use super::{exists_by_name, map_unique_violation, RepoResult};
use crate::db::UnitOfWork;
use crate::model::font::Font;
use crate::sanitize::sanitize_text;
use rusqlite::{params, Connection, OptionalExtension, Row};

const FONT_SELECT_SQL: &str = "SELECT
    id,
    name,
    file_path,
    created_at
FROM fonts";

/// Outcome of a guarded font delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontDeletion {
    /// Row removed; the blob at `file_path` is now unreferenced.
    Deleted { file_path: String },
    /// At least one group membership still references the font.
    Referenced,
    /// No font row matched the name.
    NotFound,
}

/// Repository interface for font rows.
pub trait FontRepository {
    fn create_font(&self, name: &str, file_path: &str) -> RepoResult<Font>;
    fn font_exists(&self, name: &str) -> RepoResult<bool>;
    fn get_font_by_name(&self, name: &str) -> RepoResult<Option<Font>>;
    /// Lists every font, newest first.
    fn list_fonts(&self) -> RepoResult<Vec<Font>>;
    fn delete_font(&self, name: &str) -> RepoResult<FontDeletion>;
}

/// SQLite-backed font repository.
pub struct SqliteFontRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFontRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FontRepository for SqliteFontRepository<'_> {
    fn create_font(&self, name: &str, file_path: &str) -> RepoResult<Font> {
        let name = sanitize_text(name);
        let file_path = sanitize_text(file_path);

        self.conn
            .execute(
                "INSERT INTO fonts (name, file_path) VALUES (?1, ?2);",
                params![name, file_path],
            )
            .map_err(|err| map_unique_violation(err, &name))?;

        let id = self.conn.last_insert_rowid();
        let font = self.conn.query_row(
            &format!("{FONT_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_font_row,
        )?;
        Ok(font)
    }

    fn font_exists(&self, name: &str) -> RepoResult<bool> {
        exists_by_name(self.conn, "fonts", name)
    }

    fn get_font_by_name(&self, name: &str) -> RepoResult<Option<Font>> {
        let font = self
            .conn
            .query_row(
                &format!("{FONT_SELECT_SQL} WHERE name = ?1 LIMIT 1;"),
                [name],
                parse_font_row,
            )
            .optional()?;
        Ok(font)
    }

    fn list_fonts(&self) -> RepoResult<Vec<Font>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FONT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
        let fonts = stmt
            .query_map([], parse_font_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(fonts)
    }

    fn delete_font(&self, name: &str) -> RepoResult<FontDeletion> {
        let uow = UnitOfWork::begin(self.conn)?;

        let references: i64 = uow.query_row(
            "SELECT COUNT(*) FROM font_group_items WHERE font_name = ?1;",
            [name],
            |row| row.get(0),
        )?;
        if references > 0 {
            return Ok(FontDeletion::Referenced);
        }

        let file_path: Option<String> = uow
            .query_row(
                "SELECT file_path FROM fonts WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        let Some(file_path) = file_path else {
            return Ok(FontDeletion::NotFound);
        };

        uow.execute("DELETE FROM fonts WHERE name = ?1;", [name])?;
        uow.commit()?;

        Ok(FontDeletion::Deleted { file_path })
    }
}

fn parse_font_row(row: &Row<'_>) -> rusqlite::Result<Font> {
    Ok(Font {
        id: row.get("id")?,
        name: row.get("name")?,
        file_path: row.get("file_path")?,
        created_at: row.get("created_at")?,
    })
}
