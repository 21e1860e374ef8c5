//! Font domain model.
//!
//! # Invariants
//! - `name` is unique across all fonts (case-sensitive).
//! - `file_path` points at a blob that exists for the row lifetime.
//! - `created_at` is set once by the store and never changes.

use serde::{Deserialize, Serialize};

/// File extension accepted for uploads and used for stored blobs.
pub const FONT_EXTENSION: &str = "ttf";

/// Store-assigned surrogate key.
pub type FontId = i64;

/// One persisted font row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: FontId,
    /// Logical name derived from the uploaded file name, extension stripped.
    pub name: String,
    /// Blob store locator.
    pub file_path: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Splits an uploaded file name into its logical font name.
///
/// Returns `None` unless the extension is `ttf` (any case) and the base
/// name is non-empty. Directory components sent by clients are ignored.
pub fn font_name_from_file_name(file_name: &str) -> Option<&str> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let (stem, extension) = base.rsplit_once('.')?;
    if !extension.eq_ignore_ascii_case(FONT_EXTENSION) || stem.is_empty() {
        return None;
    }
    Some(stem)
}
