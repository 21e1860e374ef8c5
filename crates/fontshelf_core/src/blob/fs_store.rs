//! Directory-backed blob store.

use super::{BlobError, BlobResult, BlobStore};
use crate::model::font::FONT_EXTENSION;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Stores each blob as `<uuid>.ttf` inside one root directory.
///
/// Locators are bare file names relative to the root, so the root directory
/// can move or contain any characters without invalidating stored rows.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Opens a store rooted at `root`, creating the directory if missing.
    pub fn open(root: impl Into<PathBuf>) -> BlobResult<Self> {
        let store = Self { root: root.into() };
        store.ensure_root()?;
        Ok(store)
    }

    /// Root directory holding all blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a locator to a path directly inside the root.
    ///
    /// Anything other than a single plain file name is rejected.
    fn resolve(&self, locator: &str) -> BlobResult<PathBuf> {
        let mut components = Path::new(locator).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file_name)), None) => Ok(self.root.join(file_name)),
            _ => Err(BlobError::Io {
                locator: locator.to_string(),
                source: std::io::Error::new(
                    ErrorKind::InvalidInput,
                    "locator must be a file name inside the blob root",
                ),
            }),
        }
    }

    fn ensure_root(&self) -> BlobResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| BlobError::Io {
            locator: self.root.display().to_string(),
            source,
        })
    }
}

impl BlobStore for FsBlobStore {
    fn store(&self, bytes: &[u8]) -> BlobResult<String> {
        // The directory may have been removed after open.
        self.ensure_root()?;

        let locator = format!("{}.{FONT_EXTENSION}", Uuid::new_v4().simple());
        let path = self.root.join(&locator);
        let io_err = |source| BlobError::Io {
            locator: locator.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(io_err)?;
        if let Err(source) = file.write_all(bytes).and_then(|()| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(io_err(source));
        }

        debug!(
            "event=blob_store module=blob status=ok bytes={} locator={}",
            bytes.len(),
            locator
        );
        Ok(locator)
    }

    fn read(&self, locator: &str) -> BlobResult<Option<Vec<u8>>> {
        match fs::read(self.resolve(locator)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BlobError::Io {
                locator: locator.to_string(),
                source,
            }),
        }
    }

    fn delete(&self, locator: &str) -> BlobResult<()> {
        match fs::remove_file(self.resolve(locator)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BlobError::Io {
                locator: locator.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FsBlobStore;
    use crate::blob::BlobStore;
    use crate::sanitize::sanitize_text;

    #[test]
    fn open_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("uploads").join("fonts");
        let store = FsBlobStore::open(&root).unwrap();
        assert!(store.root().is_dir());
        FsBlobStore::open(&root).expect("second open should be idempotent");
    }

    #[test]
    fn store_generates_distinct_ttf_locators() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).unwrap();
        let first = store.store(b"one").unwrap();
        let second = store.store(b"two").unwrap();

        assert_ne!(first, second);
        assert!(first.ends_with(".ttf"));
        assert!(dir.path().join(&first).is_file());
        assert_eq!(store.read(&first).unwrap().as_deref(), Some(&b"one"[..]));
        assert_eq!(store.read(&second).unwrap().as_deref(), Some(&b"two"[..]));
    }

    #[test]
    fn store_recreates_root_removed_after_open() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fonts");
        let store = FsBlobStore::open(&root).unwrap();
        std::fs::remove_dir(&root).unwrap();

        let locator = store.store(b"bytes").expect("store should recreate the root");
        assert!(root.join(&locator).is_file());
    }

    #[test]
    fn missing_blob_reads_none_and_deletes_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).unwrap();
        assert_eq!(store.read("nope.ttf").unwrap(), None);
        store.delete("nope.ttf").expect("deleting a missing blob is a no-op");
    }

    #[test]
    fn delete_removes_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).unwrap();
        let locator = store.store(b"bytes").unwrap();

        store.delete(&locator).unwrap();
        assert_eq!(store.read(&locator).unwrap(), None);
    }

    #[test]
    fn root_with_markup_characters_keeps_locators_plain() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("O'Neil & <Co> fonts");
        let store = FsBlobStore::open(&root).unwrap();

        let locator = store.store(b"bytes").unwrap();
        assert_eq!(sanitize_text(&locator), locator);
        assert_eq!(store.read(&locator).unwrap().as_deref(), Some(&b"bytes"[..]));

        store.delete(&locator).unwrap();
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn locators_outside_the_root_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path().join("fonts")).unwrap();
        std::fs::write(dir.path().join("outside.ttf"), b"keep").unwrap();

        for locator in ["../outside.ttf", "/etc/passwd", "nested/a.ttf", ""] {
            assert!(store.read(locator).is_err(), "read accepted {locator:?}");
            assert!(store.delete(locator).is_err(), "delete accepted {locator:?}");
        }
        assert!(dir.path().join("outside.ttf").is_file());
    }
}
