use fontshelf_core::db::open_db_in_memory;
use fontshelf_core::{
    BlobError, BlobResult, BlobStore, FontRepository, FontService, FsBlobStore, GroupRequest,
    GroupService, ServiceError, SqliteFontGroupRepository, SqliteFontRepository, UploadedFont,
};
use std::cell::RefCell;
use std::path::Path;

fn upload(file_name: &str, bytes: &[u8]) -> Option<UploadedFont> {
    Some(UploadedFont {
        file_name: file_name.to_string(),
        bytes: bytes.to_vec(),
    })
}

fn blob_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn upload_list_delete_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);

    let info = service.upload_font(upload("Sample.ttf", b"glyphs")).unwrap();
    assert_eq!(info.name, "Sample");
    assert_eq!(info.file.name, "Sample.ttf");
    assert_eq!(info.file.size, 6);
    assert!(dir.path().join(&info.url).is_file());

    let listed = service.list_fonts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Sample");
    assert_eq!(listed[0].content.as_deref(), Some(&b"glyphs"[..]));

    service.delete_font("Sample").unwrap();
    assert!(!dir.path().join(&info.url).exists());
    assert_eq!(blob_count(dir.path()), 0);
    let repo = SqliteFontRepository::new(&conn);
    assert_eq!(repo.get_font_by_name("Sample").unwrap(), None);
}

#[test]
fn blob_root_with_markup_characters_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("O'Neil & Sons fonts");
    let blobs = FsBlobStore::open(&root).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);

    service
        .upload_font(upload("Sample.ttf", b"glyphs"))
        .expect("upload into a quoted root should succeed");

    let listed = service.list_fonts().unwrap();
    assert_eq!(listed[0].content.as_deref(), Some(&b"glyphs"[..]));

    service.delete_font("Sample").unwrap();
    assert_eq!(blob_count(&root), 0);
}

#[test]
fn upload_without_payload_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);

    let err = service.upload_font(None).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Validation("No file uploaded or upload error".to_string())
    );
}

#[test]
fn upload_rejects_non_ttf_and_accepts_upper_case_extension() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);

    let err = service.upload_font(upload("Sample.otf", b"x")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Validation("Only TTF files are allowed".to_string())
    );
    assert_eq!(blob_count(dir.path()), 0);

    let info = service.upload_font(upload("Loud.TTF", b"x")).unwrap();
    assert_eq!(info.name, "Loud");
}

#[test]
fn second_upload_with_taken_name_conflicts_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);
    service.upload_font(upload("Arial.ttf", b"one")).unwrap();

    let err = service.upload_font(upload("Arial.ttf", b"two")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(service.list_fonts().unwrap().len(), 1);
    assert_eq!(blob_count(dir.path()), 1);
}

#[test]
fn failed_row_insert_removes_written_blob() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);
    // Stored names are sanitized, so the raw-name pre-check misses this
    // duplicate and the UNIQUE constraint rejects the insert instead.
    service.upload_font(upload("A&B.ttf", b"one")).unwrap();

    let err = service.upload_font(upload("A&B.ttf", b"two")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(blob_count(dir.path()), 1);
}

#[test]
fn referenced_font_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let fonts = FontService::new(SqliteFontRepository::new(&conn), &blobs);
    let arial = fonts.upload_font(upload("Arial.ttf", b"a")).unwrap();
    fonts.upload_font(upload("Times.ttf", b"t")).unwrap();
    let groups = GroupService::new(
        SqliteFontGroupRepository::new(&conn),
        SqliteFontRepository::new(&conn),
    );
    groups
        .create_group(&GroupRequest::new("Classic", ["Arial", "Times"]))
        .unwrap();

    let err = fonts.delete_font("Arial").unwrap_err();
    assert_eq!(
        err,
        ServiceError::ReferentialGuard("Cannot delete font that is in a group".to_string())
    );
    assert!(dir.path().join(&arial.url).is_file());
    assert!(SqliteFontRepository::new(&conn)
        .font_exists("Arial")
        .unwrap());
}

#[test]
fn deleting_unknown_font_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);

    let err = service.delete_font("Ghost").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn listing_survives_missing_blob() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).unwrap();
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);
    let gone = service.upload_font(upload("Gone.ttf", b"g")).unwrap();
    service.upload_font(upload("Kept.ttf", b"k")).unwrap();
    std::fs::remove_file(dir.path().join(&gone.url)).unwrap();

    let listed = service.list_fonts().unwrap();
    assert_eq!(listed.len(), 2);
    let gone_entry = listed.iter().find(|font| font.name == "Gone").unwrap();
    let kept_entry = listed.iter().find(|font| font.name == "Kept").unwrap();
    assert_eq!(gone_entry.content, None);
    assert_eq!(kept_entry.content.as_deref(), Some(&b"k"[..]));
}

/// Blob store whose deletes always fail, recording the attempts.
struct StickyBlobs {
    inner: FsBlobStore,
    delete_attempts: RefCell<Vec<String>>,
}

impl BlobStore for StickyBlobs {
    fn store(&self, bytes: &[u8]) -> BlobResult<String> {
        self.inner.store(bytes)
    }

    fn read(&self, locator: &str) -> BlobResult<Option<Vec<u8>>> {
        self.inner.read(locator)
    }

    fn delete(&self, locator: &str) -> BlobResult<()> {
        self.delete_attempts.borrow_mut().push(locator.to_string());
        Err(BlobError::Io {
            locator: locator.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn blob_cleanup_failure_does_not_fail_committed_delete() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = StickyBlobs {
        inner: FsBlobStore::open(dir.path()).unwrap(),
        delete_attempts: RefCell::new(Vec::new()),
    };
    let service = FontService::new(SqliteFontRepository::new(&conn), &blobs);
    let info = service.upload_font(upload("Sample.ttf", b"s")).unwrap();

    service.delete_font("Sample").expect("row delete already committed");
    assert_eq!(*blobs.delete_attempts.borrow(), vec![info.url]);
    assert!(!SqliteFontRepository::new(&conn)
        .font_exists("Sample")
        .unwrap());
}
