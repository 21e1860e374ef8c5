use fontshelf_core::db::open_db_in_memory;
use fontshelf_core::{
    FontDeletion, FontGroupRepository, FontRepository, RepoError, SqliteFontGroupRepository,
    SqliteFontRepository,
};

#[test]
fn create_and_get_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);

    let created = repo.create_font("Arial", "/blobs/a.ttf").unwrap();
    assert!(created.id > 0);
    assert!(created.created_at > 0);

    let loaded = repo.get_font_by_name("Arial").unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(repo.font_exists("Arial").unwrap());
    assert!(!repo.font_exists("arial").unwrap());
    assert_eq!(repo.get_font_by_name("Missing").unwrap(), None);
}

#[test]
fn duplicate_name_maps_to_duplicate_name_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);
    repo.create_font("Arial", "/blobs/a.ttf").unwrap();

    let err = repo.create_font("Arial", "/blobs/b.ttf").unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Arial"));
    assert_eq!(repo.list_fonts().unwrap().len(), 1);
}

#[test]
fn create_sanitizes_name_and_path() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);

    let created = repo
        .create_font("<b>Bold</b> & Co", "/blobs/<x>.ttf")
        .unwrap();
    assert_eq!(created.name, "Bold &amp; Co");
    assert_eq!(created.file_path, "/blobs/.ttf");
}

#[test]
fn list_fonts_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);
    repo.create_font("Old", "/blobs/old.ttf").unwrap();
    repo.create_font("Mid", "/blobs/mid.ttf").unwrap();
    repo.create_font("New", "/blobs/new.ttf").unwrap();
    conn.execute("UPDATE fonts SET created_at = 3000 WHERE name = 'Old';", [])
        .unwrap();
    conn.execute("UPDATE fonts SET created_at = 1000 WHERE name = 'Mid';", [])
        .unwrap();
    conn.execute("UPDATE fonts SET created_at = 2000 WHERE name = 'New';", [])
        .unwrap();

    let names: Vec<String> = repo
        .list_fonts()
        .unwrap()
        .into_iter()
        .map(|font| font.name)
        .collect();
    assert_eq!(names, vec!["Old", "New", "Mid"]);
}

#[test]
fn delete_unreferenced_font_returns_its_file_path() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);
    repo.create_font("Arial", "/blobs/a.ttf").unwrap();

    let deletion = repo.delete_font("Arial").unwrap();
    assert_eq!(
        deletion,
        FontDeletion::Deleted {
            file_path: "/blobs/a.ttf".to_string()
        }
    );
    assert_eq!(repo.get_font_by_name("Arial").unwrap(), None);
}

#[test]
fn delete_missing_font_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFontRepository::new(&conn);

    let deletion = repo
        .delete_font("Ghost")
        .expect("deleting an unknown font is an outcome, not an error");
    assert_eq!(deletion, FontDeletion::NotFound);
}

#[test]
fn delete_referenced_font_is_refused_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let fonts = SqliteFontRepository::new(&conn);
    let groups = SqliteFontGroupRepository::new(&conn);
    fonts.create_font("Arial", "/blobs/a.ttf").unwrap();
    fonts.create_font("Times", "/blobs/t.ttf").unwrap();
    groups
        .create_group("Classic", &["Arial".to_string(), "Times".to_string()])
        .unwrap();

    assert_eq!(fonts.delete_font("Arial").unwrap(), FontDeletion::Referenced);
    assert!(fonts.font_exists("Arial").unwrap());

    groups.delete_group("Classic").unwrap();
    assert!(matches!(
        fonts.delete_font("Arial").expect("unreferenced font should delete"),
        FontDeletion::Deleted { .. }
    ));
}
