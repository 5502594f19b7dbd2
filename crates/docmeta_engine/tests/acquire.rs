use docmeta_engine::{select_local_file, AcquireError, FALLBACK_MIME_TYPE};
use tempfile::TempDir;

#[test]
fn declared_type_comes_from_extension() {
    let temp = TempDir::new().unwrap();
    let cases = [
        ("a.pdf", "application/pdf"),
        (
            "b.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        ("c.doc", "application/msword"),
        ("d.txt", "text/plain"),
        ("e.png", "image/png"),
        ("f.jpg", "image/jpeg"),
        ("g.zip", "application/zip"),
    ];
    for (name, expected) in cases {
        let path = temp.path().join(name);
        std::fs::write(&path, b"abc").unwrap();
        let file = select_local_file(&path).unwrap();
        assert_eq!(file.mime_type, expected, "{name}");
        assert_eq!(file.name, name);
        assert_eq!(file.byte_size, 3);
        assert_eq!(file.location, path);
    }
}

#[test]
fn unknown_extension_gets_fallback_type() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("blob.unknownext");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(select_local_file(&path).unwrap().mime_type, FALLBACK_MIME_TYPE);
}

#[test]
fn directories_and_missing_paths_are_errors() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        select_local_file(temp.path()),
        Err(AcquireError::NotAFile(_))
    ));
    assert!(matches!(
        select_local_file(&temp.path().join("missing.pdf")),
        Err(AcquireError::Io { .. })
    ));
}
