//! Binary font storage.
//!
//! # Responsibility
//! - Persist uploaded font bytes under store-generated unique names.
//! - Serve and remove blobs by opaque locator.
//!
//! # Invariants
//! - `store` never overwrites an existing blob.
//! - Missing blobs are `None` on read and a no-op on delete, never errors.

mod fs_store;

pub use fs_store::FsBlobStore;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobError>;

/// Storage medium failure.
#[derive(Debug)]
pub enum BlobError {
    Io {
        locator: String,
        source: std::io::Error,
    },
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { locator, source } => write!(f, "blob io failed at `{locator}`: {source}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Blob storage contract used by font workflows.
pub trait BlobStore {
    /// Writes `bytes` under a fresh unique name and returns its locator.
    fn store(&self, bytes: &[u8]) -> BlobResult<String>;
    /// Reads blob content, `None` when the locator resolves to nothing.
    fn read(&self, locator: &str) -> BlobResult<Option<Vec<u8>>>;
    /// Removes the blob if present.
    fn delete(&self, locator: &str) -> BlobResult<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn store(&self, bytes: &[u8]) -> BlobResult<String> {
        (**self).store(bytes)
    }

    fn read(&self, locator: &str) -> BlobResult<Option<Vec<u8>>> {
        (**self).read(locator)
    }

    fn delete(&self, locator: &str) -> BlobResult<()> {
        (**self).delete(locator)
    }
}
