//! Runs the fp2latex binary against small content trees.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn record(title: &str, text: &str, timestamp: &str) -> String {
    format!("VERSION|system|SUBJECT|{title}|CONTENT|{text}|AUTHOR|admin|DATE|{timestamp}|")
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Two valid entries, one malformed record, one out-of-range entry and an image folder.
fn setup_blog() -> TempDir {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content");
    write(
        &content.join("23/01/entry230129-134640.txt"),
        &record("Second post", "Later [i]news[/i]", "1675000000"),
    );
    write(
        &content.join("23/01/entry230106-101320.txt"),
        &record("First post", "[img=photo.jpg] Hello photo.jpg", "1673000000"),
    );
    write(
        &content.join("23/01/broken.txt"),
        "VERSION|system|SUBJECT|Broken|CONTENT|x|AUTHOR|admin|DATE|1674000000",
    );
    write(
        &content.join("22/12/entry221215-000000.txt"),
        &record("Last year", "old", "1671062400"),
    );
    write(&dir.path().join("gallery/2023/photo.jpg"), "jpeg bytes");
    dir
}

fn convert(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fp2latex"));
    cmd.current_dir(dir.path())
        .env("TZ", "UTC")
        .args(["--content", "content"])
        .args(["--from-date", "2023-01-01", "--to-date", "2023-03-31"])
        .args(["--output", "blog", "--images", "gallery"]);
    cmd
}

#[test]
fn test_converts_entries_in_timestamp_order() {
    let dir = setup_blog();

    convert(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("blog.tex"))
        .stderr(predicate::str::contains("ERROR").not());

    let doc = fs::read_to_string(dir.path().join("blog.tex")).unwrap();
    assert_eq!(doc.matches("\\section*{").count(), 2);
    assert!(!doc.contains("Broken"));
    assert!(!doc.contains("Last year"));

    let first = doc.find("\\section*{First post}").unwrap();
    let second = doc.find("\\section*{Second post}").unwrap();
    assert!(first < second);
    assert!(doc.contains("2023-01-06 10:13:20%\n"));
    assert!(doc.contains("2023-01-29 13:46:40%\n"));
    assert!(doc.contains("\\includegraphics[width=0.5\\textwidth]{images/photo.jpg}"));
    assert!(doc.contains("Hello photo.jpg%\n"));
    assert!(doc.contains("Later \\emph{news}%\n"));

    let copied = fs::read_to_string(dir.path().join("images/photo.jpg")).unwrap();
    assert_eq!(copied, "jpeg bytes");
}

#[test]
fn test_rerun_produces_identical_document() {
    let dir = setup_blog();

    convert(&dir).assert().success();
    let first = fs::read(dir.path().join("blog.tex")).unwrap();
    convert(&dir).assert().success();
    let second = fs::read(dir.path().join("blog.tex")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_image_directory_still_converts() {
    let dir = setup_blog();
    fs::remove_dir_all(dir.path().join("gallery")).unwrap();

    convert(&dir).assert().success();

    let doc = fs::read_to_string(dir.path().join("blog.tex")).unwrap();
    assert!(!doc.contains("wrapfigure"));
    assert!(!dir.path().join("images/photo.jpg").exists());
}

#[test]
fn test_unreadable_entry_is_logged_and_skipped() {
    let dir = setup_blog();
    fs::write(dir.path().join("content/23/01/a.txt"), [0xffu8, 0xfe, 0x00]).unwrap();

    convert(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("FILE: a.txt"))
        .stderr(predicate::str::contains("PATH: content/23/01"));

    let doc = fs::read_to_string(dir.path().join("blog.tex")).unwrap();
    assert_eq!(doc.matches("\\section*{").count(), 2);
}

#[test]
fn test_images_folder_as_search_path_keeps_copies() {
    let dir = setup_blog();

    convert(&dir).assert().success();
    Command::new(assert_cmd::cargo::cargo_bin!("fp2latex"))
        .current_dir(dir.path())
        .env("TZ", "UTC")
        .args(["--content", "content", "--output", "blog"])
        .args(["--from-date", "2023-01-01", "--to-date", "2023-03-31"])
        .args(["--images", "images", "gallery"])
        .assert()
        .success();

    let copied = fs::read_to_string(dir.path().join("images/photo.jpg")).unwrap();
    assert_eq!(copied, "jpeg bytes");
}

#[test]
fn test_invalid_date_fails() {
    let dir = setup_blog();

    Command::new(assert_cmd::cargo::cargo_bin!("fp2latex"))
        .current_dir(dir.path())
        .args(["--content", "content", "--output", "blog"])
        .args(["--from-date", "01/01/2023", "--to-date", "2023-03-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));

    assert!(!dir.path().join("blog.tex").exists());
}

#[test]
fn test_missing_content_root_fails() {
    let dir = TempDir::new().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("fp2latex"))
        .current_dir(dir.path())
        .args(["--content", "nowhere", "--output", "blog"])
        .args(["--from-date", "2023-01-01", "--to-date", "2023-03-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_log_file_records_progress() {
    let dir = setup_blog();

    convert(&dir).args(["--log-file", "run.log"]).assert().success();

    let log = fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("Processing First post"));
    assert!(log.contains("Image: photo.jpg"));
}
