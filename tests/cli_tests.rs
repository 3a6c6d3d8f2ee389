//! Integration tests for the dayport binary

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{dayport_cmd, member_names, photo_members};

const POSTS: &str = r#"[
    {"timestamp": 1600000000, "title": "Status", "tags": ["x"],
     "data": [{"post": "hello"}],
     "attachments": [{"data": [{"media": {"uri": "photos/a.jpg",
        "media_metadata": {"photo_metadata": {"latitude": 45.5, "longitude": -122.6}}}}]}]},
    {"data": [{"media": {"uri": "photos/b.jpg", "media_metadata": {"photo_metadata": {}}}}]}
]"#;

fn write_export(root: &std::path::Path) {
    fs::create_dir_all(root.join("posts")).unwrap();
    fs::create_dir_all(root.join("photos")).unwrap();
    fs::write(root.join("posts/your_posts_1.json"), POSTS).unwrap();
    fs::write(root.join("photos/a.jpg"), b"same").unwrap();
    fs::write(root.join("photos/b.jpg"), b"same").unwrap();
}

#[test]
fn test_import_export_directory() {
    let temp = TempDir::new().unwrap();
    write_export(&temp.path().join("export"));
    let output = temp.path().join("out.zip");

    dayport_cmd()
        .current_dir(temp.path())
        .arg("import")
        .arg("--facebook")
        .arg("export")
        .arg("--name")
        .arg("My Facebook")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries with 2 photos"));

    let names = member_names(&output);
    assert!(names.contains("My Facebook.json"));
    assert_eq!(photo_members(&output).len(), 1);
}

#[test]
fn test_import_posts_file_with_media_root() {
    let temp = TempDir::new().unwrap();
    let export = temp.path().join("export");
    write_export(&export);
    let output = temp.path().join("out.zip");

    dayport_cmd()
        .current_dir(temp.path())
        .arg("import")
        .arg("--posts")
        .arg(export.join("posts/your_posts_1.json"))
        .arg("--media-root")
        .arg(&export)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(member_names(&output).contains("Facebook.json"));
}

#[test]
fn test_import_missing_photo_fails() {
    let temp = TempDir::new().unwrap();
    let export = temp.path().join("export");
    write_export(&export);
    let output = temp.path().join("out.zip");

    // Without --media-root, photo paths resolve against posts/ and are missing.
    dayport_cmd()
        .current_dir(temp.path())
        .arg("import")
        .arg("--posts")
        .arg(export.join("posts/your_posts_1.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--media-root"));

    assert!(!output.exists());
}

#[test]
fn test_import_malformed_posts() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("posts.json"), "{ broken").unwrap();

    dayport_cmd()
        .current_dir(temp.path())
        .arg("import")
        .arg("--posts")
        .arg("posts.json")
        .assert()
        .code(2);

    assert!(!temp.path().join("journal.zip").exists());
}

#[test]
fn test_dump_prints_journal() {
    let temp = TempDir::new().unwrap();
    write_export(&temp.path().join("export"));

    dayport_cmd()
        .current_dir(temp.path())
        .args(["import", "--facebook", "export"])
        .assert()
        .success();

    dayport_cmd()
        .current_dir(temp.path())
        .args(["dump", "journal.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"1.0\""))
        .stdout(predicate::str::contains("\"creationDate\": \"2020-09-13T12:26:40Z\""))
        .stdout(predicate::str::contains("# Status\\nhello"))
        .stdout(predicate::str::contains("\"Facebook-Post\""))
        .stdout(predicate::str::contains("\"md5\""));
}

#[test]
fn test_repack_round_trip() {
    let temp = TempDir::new().unwrap();
    write_export(&temp.path().join("export"));

    dayport_cmd()
        .current_dir(temp.path())
        .args(["import", "--facebook", "export"])
        .assert()
        .success();

    dayport_cmd()
        .current_dir(temp.path())
        .args(["repack", "journal.zip", "copy.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repacked 1 journal and 1 photo"));

    assert_eq!(
        member_names(&temp.path().join("journal.zip")),
        member_names(&temp.path().join("copy.zip"))
    );
}

#[test]
fn test_config_file_names_journal() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("dayport.toml"),
        "[journal]\nname = \"Configured\"\n\n[geocode]\nenabled = false\n",
    )
    .unwrap();

    dayport_cmd()
        .current_dir(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 entries"));

    assert!(member_names(&temp.path().join("journal.zip")).contains("Configured.json"));
}

#[test]
fn test_missing_explicit_config() {
    let temp = TempDir::new().unwrap();

    dayport_cmd()
        .current_dir(temp.path())
        .args(["--config", "absent.toml", "import"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_dump_missing_archive() {
    let temp = TempDir::new().unwrap();

    dayport_cmd()
        .current_dir(temp.path())
        .args(["dump", "nothing.zip"])
        .assert()
        .failure();
}
