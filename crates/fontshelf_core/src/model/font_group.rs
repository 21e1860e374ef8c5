//! Font group domain model.
//!
//! # Invariants
//! - A group has at least two distinct member font names after any
//!   successful create or update.
//! - Renaming a group keeps its `id` and `created_at`.

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key.
pub type FontGroupId = i64;

/// Minimum number of distinct fonts a group must hold.
pub const MIN_GROUP_FONTS: usize = 2;

/// One persisted group row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontGroup {
    pub id: FontGroupId,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Group member as seen by readers: the font name joined to its blob path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFont {
    pub name: String,
    pub file_path: String,
}

/// Group listing entry with its current members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontGroupRecord {
    pub id: FontGroupId,
    pub name: String,
    pub fonts: Vec<GroupFont>,
}
