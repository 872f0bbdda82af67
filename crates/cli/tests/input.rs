use cli::input::read_image;
use std::fs;
use tempfile::tempdir;

#[test]
fn reads_image_bytes() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("stone.png");
    fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
    assert_eq!(read_image(&path).unwrap().len(), 8);
}

#[test]
fn empty_or_missing_files_are_errors() {
    let temp = tempdir().unwrap();
    let empty = temp.path().join("empty.jpg");
    fs::write(&empty, b"").unwrap();
    assert!(read_image(&empty).is_err());
    assert!(read_image(&temp.path().join("missing.jpg")).is_err());
}
