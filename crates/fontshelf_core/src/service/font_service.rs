//! Font upload/list/delete workflows.
//!
//! # Responsibility
//! - Validate uploads and derive logical font names from file names.
//! - Keep font rows and blobs in step: blob first on upload, row first on
//!   delete.
//!
//! # Invariants
//! - A failed row insert removes the blob written for it before returning.
//! - Blob cleanup after a committed row delete is best-effort and never
//!   turns the delete into a failure.
//! - One missing or unreadable blob never fails the whole listing.

use crate::blob::BlobStore;
use crate::model::font::font_name_from_file_name;
use crate::repo::font_repo::{FontDeletion, FontRepository};
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use log::{error, info, warn};
use serde::Serialize;

const MSG_UPLOAD_MISSING: &str = "No file uploaded or upload error";
const MSG_UNSUPPORTED_TYPE: &str = "Only TTF files are allowed";
const MSG_FONT_EXISTS: &str = "Font with this name already exists";
const MSG_STORE_FAILED: &str = "Failed to upload file";
const MSG_RECORD_FAILED: &str = "Failed to save font record";
const MSG_FONT_REFERENCED: &str = "Cannot delete font that is in a group";
const MSG_FONT_NOT_FOUND: &str = "Font not found";
const MSG_DELETE_FAILED: &str = "Failed to delete font";
const MSG_LIST_FAILED: &str = "Failed to load fonts";
const MSG_LOOKUP_FAILED: &str = "Failed to check existing fonts";

/// Upload payload as handed over by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFont {
    /// Client-declared file name, including extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Client-declared file facts echoed back after an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFileMeta {
    pub name: String,
    pub size: u64,
}

/// Upload result: the logical name and where the blob landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFontInfo {
    pub name: String,
    pub file: UploadedFileMeta,
    pub url: String,
}

/// Listing entry carrying raw blob bytes, `None` when the blob is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontListing {
    pub name: String,
    pub content: Option<Vec<u8>>,
}

/// Font workflow facade over a font repository and a blob store.
pub struct FontService<R: FontRepository, B: BlobStore> {
    repo: R,
    blobs: B,
}

impl<R: FontRepository, B: BlobStore> FontService<R, B> {
    pub fn new(repo: R, blobs: B) -> Self {
        Self { repo, blobs }
    }

    /// Stores an uploaded font file and records it under its base name.
    ///
    /// `None` means the transport layer received no file or failed while
    /// receiving it.
    pub fn upload_font(&self, upload: Option<UploadedFont>) -> ServiceResult<UploadedFontInfo> {
        let Some(upload) = upload else {
            return Err(ServiceError::Validation(MSG_UPLOAD_MISSING.to_string()));
        };
        let Some(name) = font_name_from_file_name(&upload.file_name) else {
            return Err(ServiceError::Validation(MSG_UNSUPPORTED_TYPE.to_string()));
        };

        let exists = self.repo.font_exists(name).map_err(|err| {
            error!("event=font_upload module=service status=error error_code=lookup_failed error={err}");
            ServiceError::Store(MSG_LOOKUP_FAILED.to_string())
        })?;
        if exists {
            return Err(ServiceError::Conflict(MSG_FONT_EXISTS.to_string()));
        }

        let locator = self.blobs.store(&upload.bytes).map_err(|err| {
            error!("event=font_upload module=service status=error error_code=blob_store_failed error={err}");
            ServiceError::Io(MSG_STORE_FAILED.to_string())
        })?;

        if let Err(err) = self.repo.create_font(name, &locator) {
            if let Err(cleanup_err) = self.blobs.delete(&locator) {
                warn!(
                    "event=blob_cleanup module=service status=error locator={} error={}",
                    locator, cleanup_err
                );
            }
            return Err(match err {
                RepoError::DuplicateName(_) => ServiceError::Conflict(MSG_FONT_EXISTS.to_string()),
                other => {
                    error!("event=font_upload module=service status=error error_code=insert_failed error={other}");
                    ServiceError::Store(MSG_RECORD_FAILED.to_string())
                }
            });
        }

        info!(
            "event=font_upload module=service status=ok name={:?} bytes={}",
            name,
            upload.bytes.len()
        );
        Ok(UploadedFontInfo {
            name: name.to_string(),
            file: UploadedFileMeta {
                name: upload.file_name.clone(),
                size: upload.bytes.len() as u64,
            },
            url: locator,
        })
    }

    /// Lists every font newest first, with blob content when readable.
    pub fn list_fonts(&self) -> ServiceResult<Vec<FontListing>> {
        let fonts = self.repo.list_fonts().map_err(|err| {
            error!("event=font_list module=service status=error error={err}");
            ServiceError::Store(MSG_LIST_FAILED.to_string())
        })?;

        let listings = fonts
            .into_iter()
            .map(|font| {
                let content = match self.blobs.read(&font.file_path) {
                    Ok(content) => content,
                    Err(err) => {
                        warn!("event=font_list module=service status=degraded name={:?} error={err}", font.name);
                        None
                    }
                };
                FontListing {
                    name: font.name,
                    content,
                }
            })
            .collect();
        Ok(listings)
    }

    /// Deletes a font that no group references, then its blob.
    pub fn delete_font(&self, name: &str) -> ServiceResult<()> {
        let deletion = self.repo.delete_font(name).map_err(|err| {
            error!("event=font_delete module=service status=error name={name:?} error={err}");
            ServiceError::Transaction(MSG_DELETE_FAILED.to_string())
        })?;

        match deletion {
            FontDeletion::Referenced => {
                Err(ServiceError::ReferentialGuard(MSG_FONT_REFERENCED.to_string()))
            }
            FontDeletion::NotFound => Err(ServiceError::NotFound(MSG_FONT_NOT_FOUND.to_string())),
            FontDeletion::Deleted { file_path } => {
                if let Err(err) = self.blobs.delete(&file_path) {
                    warn!(
                        "event=blob_cleanup module=service status=error locator={} error={}",
                        file_path, err
                    );
                }
                info!("event=font_delete module=service status=ok name={name:?}");
                Ok(())
            }
        }
    }
}
