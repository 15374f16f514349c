use envsync_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(".env"));

    io::write_text(&path, "A=1\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "A=1\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(".env");
    fs::write(&file_path, "A=old\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_text(&path, "A=new\n").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "A=new\n");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("deploy/staging/.env"));

    io::write_text(&path, "STAGE=staging\n").unwrap();

    assert!(path.is_file());
}

#[test]
fn test_failed_rename_keeps_destination_intact() {
    // Renaming a file over a non-empty directory fails on every platform.
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("target");
    fs::create_dir_all(dest.join("occupied")).unwrap();

    let path = NormalizedPath::new(&dest);
    let result = io::write_text(&path, "A=1\n");

    assert!(result.is_err());
    assert!(dest.join("occupied").is_dir());

    // No stray temp files left next to the destination
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[test]
fn test_read_text_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.env"));

    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
}
