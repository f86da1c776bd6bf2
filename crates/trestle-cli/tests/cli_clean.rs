use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn trestle_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trestle").unwrap();
    cmd.env_remove("TRESTLE_SETTINGS_DIR").env_remove("RUST_LOG");
    cmd
}

fn android_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let settings_dir = tmp.path().join("android");
    fs::create_dir_all(&settings_dir).unwrap();
    fs::write(
        settings_dir.join("Trestle.toml"),
        "include = [\":app\", \":feature\"]\n",
    )
    .unwrap();
    tmp
}

#[test]
fn test_clean_removes_build_directory() {
    let tmp = android_project();
    let build_dir = tmp.path().join("build");
    fs::create_dir_all(build_dir.join("app")).unwrap();
    fs::write(build_dir.join("app").join("app.apk"), "fake").unwrap();

    trestle_cmd()
        .current_dir(tmp.path().join("android"))
        .args(["clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned"))
        .stderr(predicate::str::contains("Cleaned").not());

    assert!(!build_dir.exists());
    assert!(tmp.path().join("android").join("Trestle.toml").exists());
}

#[test]
fn test_clean_no_build_dir_prints_nothing_to_clean() {
    let tmp = android_project();

    trestle_cmd()
        .current_dir(tmp.path().join("android"))
        .args(["clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_clean_specific_project() {
    let tmp = android_project();
    let build_dir = tmp.path().join("build");
    fs::create_dir_all(build_dir.join("app")).unwrap();
    fs::create_dir_all(build_dir.join("feature")).unwrap();

    trestle_cmd()
        .current_dir(tmp.path().join("android"))
        .args(["clean", "--project", ":app"])
        .assert()
        .success();

    assert!(!build_dir.join("app").exists());
    assert!(build_dir.join("feature").exists());
}

#[test]
fn test_clean_unknown_project_fails() {
    let tmp = android_project();

    trestle_cmd()
        .current_dir(tmp.path().join("android"))
        .args(["clean", "--project", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not included"));
}

#[test]
fn test_clean_refuses_build_dir_containing_settings() {
    let tmp = TempDir::new().unwrap();
    let settings_dir = tmp.path().join("android");
    fs::create_dir_all(&settings_dir).unwrap();
    fs::write(
        settings_dir.join("Trestle.toml"),
        "[layout]\nbuild-dir = \"..\"\n",
    )
    .unwrap();

    trestle_cmd()
        .current_dir(&settings_dir)
        .args(["clean"])
        .assert()
        .failure();

    assert!(settings_dir.join("Trestle.toml").exists());
}

#[test]
fn test_clean_without_settings_fails() {
    let tmp = TempDir::new().unwrap();

    trestle_cmd()
        .current_dir(tmp.path())
        .args(["clean"])
        .assert()
        .failure();
}
