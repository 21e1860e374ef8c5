//! Core domain logic for fontshelf: font files, font groups and the rules
//! that keep them consistent.
//!
//! The crate is synchronous and transport-agnostic. Callers open a
//! connection with [`db::open_db`], a blob store with [`FsBlobStore::open`],
//! and drive the workflows in [`service`].

pub mod blob;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod response;
pub mod sanitize;
pub mod service;

pub use blob::{BlobError, BlobResult, BlobStore, FsBlobStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::font::{font_name_from_file_name, Font, FontId, FONT_EXTENSION};
pub use model::font_group::{FontGroup, FontGroupId, FontGroupRecord, GroupFont, MIN_GROUP_FONTS};
pub use repo::font_group_repo::{FontGroupRepository, SqliteFontGroupRepository};
pub use repo::font_repo::{FontDeletion, FontRepository, SqliteFontRepository};
pub use repo::{RepoError, RepoResult};
pub use response::ApiResponse;
pub use service::error::{ServiceError, ServiceResult};
pub use service::font_service::{
    FontListing, FontService, UploadedFileMeta, UploadedFont, UploadedFontInfo,
};
pub use service::group_service::{FontRef, GroupRequest, GroupService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
