use std::path::{Path, PathBuf};

use trestle_util::fs::{absolutize, find_ancestor_with, is_within, normalize};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Trestle.toml"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Trestle.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Trestle.toml"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Trestle.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_normalize_folds_dot_components() {
    assert_eq!(
        normalize(Path::new("/work/android/../build/./app")),
        PathBuf::from("/work/build/app")
    );
}

#[test]
fn test_normalize_keeps_leading_parent_of_relative_path() {
    assert_eq!(normalize(Path::new("../../x")), PathBuf::from("../../x"));
}

#[test]
fn test_normalize_parent_of_root_is_root() {
    assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
}

#[test]
fn test_absolutize_relative_against_base() {
    let resolved = absolutize(Path::new("../build"), Some(Path::new("/work/android")));
    assert_eq!(resolved, Some(PathBuf::from("/work/build")));
}

#[test]
fn test_absolutize_empty_path_is_none() {
    assert_eq!(absolutize(Path::new(""), Some(Path::new("/work"))), None);
}

#[test]
fn test_absolutize_relative_base_is_none() {
    assert_eq!(absolutize(Path::new("build"), Some(Path::new("work"))), None);
}

#[test]
fn test_absolutize_without_base_uses_cwd() {
    let resolved = absolutize(Path::new("build"), None).unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("build"));
}

#[test]
fn test_is_within() {
    assert!(is_within(Path::new("/work/build/app"), Path::new("/work/build")));
    assert!(is_within(Path::new("/work/build"), Path::new("/work/build")));
    assert!(!is_within(Path::new("/work"), Path::new("/work/build")));
    assert!(!is_within(Path::new("/work/build/../src"), Path::new("/work/build")));
    assert!(!is_within(Path::new("/work/buildx"), Path::new("/work/build")));
}
