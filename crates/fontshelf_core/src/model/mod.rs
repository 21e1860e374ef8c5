//! Domain model for uploaded fonts and named font groups.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, services and callers.
//!
//! # Invariants
//! - Fonts and groups are identified externally by unique `name`.
//! - Group membership references fonts by name, never by id.

pub mod font;
pub mod font_group;
