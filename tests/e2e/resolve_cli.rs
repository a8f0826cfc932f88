//! E2E tests resolving real files through the binary

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary with an isolated config dir and no extractor on PATH
fn thumbview(temp: &TempDir) -> Command {
    let empty_bin = temp.path().join("empty-bin");
    fs::create_dir_all(&empty_bin).unwrap();
    let mut cmd = cargo_bin_cmd!("thumbview");
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("PATH", &empty_bin);
    cmd
}

fn media_dir(temp: &TempDir) -> std::path::PathBuf {
    let dir = temp.path().join("media");
    fs::create_dir_all(dir.join("album")).unwrap();
    fs::write(dir.join("a.jpg"), b"jpeg").unwrap();
    fs::write(dir.join("v.mp4"), b"not really a video").unwrap();
    fs::write(dir.join("notes.txt"), b"hello").unwrap();
    dir
}

#[test]
fn picture_resolves_to_itself() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);
    let jpg = dir.join("a.jpg");

    thumbview(&temp)
        .arg(&jpg)
        .assert()
        .success()
        .stdout(format!("{}\t{}\n", jpg.display(), jpg.display()));
}

#[test]
fn directory_resolves_to_folder_icon() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);

    thumbview(&temp)
        .args(["--threshold", "0"])
        .arg(dir.join("album"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\ticon:folder\n"));
}

#[test]
fn zero_threshold_gates_files() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);

    thumbview(&temp)
        .args(["--threshold", "0"])
        .arg(dir.join("a.jpg"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\ticon:file\n"));
}

#[test]
fn video_without_extractor_resolves_to_file_icon() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);

    thumbview(&temp)
        .arg(dir.join("v.mp4"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\ticon:file\n"));
}

#[test]
fn results_keep_argument_order() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);

    let output = thumbview(&temp)
        .arg(dir.join("v.mp4"))
        .arg(dir.join("a.jpg"))
        .arg(dir.join("album"))
        .arg(dir.join("notes.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let results: Vec<&str> = stdout
        .lines()
        .map(|l| l.split('\t').nth(1).unwrap())
        .collect();
    let jpg = dir.join("a.jpg").display().to_string();
    assert_eq!(
        results,
        vec!["icon:file", jpg.as_str(), "icon:folder", "icon:file"]
    );
}

#[test]
fn json_output() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);

    let output = thumbview(&temp)
        .args(["--format", "json"])
        .arg(dir.join("a.jpg"))
        .arg(dir.join("album"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["kind"], "path");
    assert_eq!(value[1]["kind"], "icon");
    assert_eq!(value[1]["thumbnail"], "folder");
}

#[test]
fn thumb_dir_removed_on_exit_unless_kept() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);
    let thumbs = temp.path().join("thumbs");

    thumbview(&temp)
        .arg("--thumb-dir")
        .arg(&thumbs)
        .arg(dir.join("a.jpg"))
        .assert()
        .success();
    assert!(!thumbs.exists());

    thumbview(&temp)
        .arg("--thumb-dir")
        .arg(&thumbs)
        .arg("--keep")
        .arg(dir.join("a.jpg"))
        .assert()
        .success();
    assert!(thumbs.is_dir());
}

#[test]
fn config_file_threshold_applies() {
    let temp = TempDir::new().unwrap();
    let dir = media_dir(&temp);
    let config = temp.path().join("thumbview.toml");
    fs::write(&config, "[thumbnails]\nthreshold = 0\n").unwrap();

    thumbview(&temp)
        .arg("--config")
        .arg(&config)
        .arg(dir.join("a.jpg"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\ticon:file\n"));

    // CLI wins over the file
    let jpg = dir.join("a.jpg");
    thumbview(&temp)
        .arg("--config")
        .arg(&config)
        .args(["--threshold", "-1"])
        .arg(&jpg)
        .assert()
        .success()
        .stdout(format!("{}\t{}\n", jpg.display(), jpg.display()));
}
