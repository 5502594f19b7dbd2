use std::fs;

use docmeta_core::{ExportFile, EXPORT_MIME_TYPE};
use docmeta_engine::{save_export, ExportDir, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_export_dir() {
    let temp = TempDir::new().unwrap();
    let dir = ExportDir::new(temp.path().join("out"));
    assert!(!dir.path().exists());
    dir.prepare().unwrap();
    assert!(dir.path().is_dir());
}

#[test]
fn repeated_write_replaces_earlier_file() {
    let temp = TempDir::new().unwrap();
    let dir = ExportDir::new(temp.path());

    let first = dir.write_atomic("metadata_a.json", b"{}").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "{}");

    let second = dir
        .write_atomic("metadata_a.json", b"{\n  \"x\": 1\n}")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "{\n  \"x\": 1\n}");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn export_lands_inside_directory_with_safe_name() {
    let temp = TempDir::new().unwrap();
    let export = ExportFile {
        filename: "metadata_../evil.json".to_string(),
        mime_type: EXPORT_MIME_TYPE,
        contents: "{}".to_string(),
    };
    let saved = save_export(temp.path(), &export).unwrap();
    assert_eq!(saved.parent().unwrap(), temp.path());
    assert_eq!(saved.file_name().unwrap(), "metadata_.._evil.json");
}

#[test]
fn export_name_keeps_repeated_underscores() {
    let temp = TempDir::new().unwrap();
    for filename in ["metadata_my__notes.txt.json", "metadata__draft.txt.json"] {
        let export = ExportFile {
            filename: filename.to_string(),
            mime_type: EXPORT_MIME_TYPE,
            contents: "{}".to_string(),
        };
        let saved = save_export(temp.path(), &export).unwrap();
        assert_eq!(saved, temp.path().join(filename));
    }
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = ExportDir::new(&file_path)
        .write_atomic("metadata_a.json", b"{}")
        .unwrap_err();
    assert!(matches!(err, PersistError::ExportDir { .. }));
}
