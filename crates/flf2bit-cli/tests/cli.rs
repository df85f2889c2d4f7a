use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../flf2bit/tests/data/mini.flf")
}

fn flf2bit() -> Command {
    Command::cargo_bin("flf2bit").unwrap()
}

fn convert_fixture(dir: &Path) -> PathBuf {
    let out = dir.join("mini.bit");
    flf2bit()
        .arg("convert")
        .arg(fixture())
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully converted"));
    out
}

#[test]
fn convert_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = convert_fixture(dir.path());
    let json = std::fs::read_to_string(out).unwrap();
    assert!(json.contains("\"name\": \"Mini Fixture\""));
    assert!(json.contains("\"author\": \"drawn by the flf2bit tests\""));
    assert!(json.contains("\"#\": ["));
}

#[test]
fn convert_with_overrides_and_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mapped.bit");
    flf2bit()
        .args(["convert", "--name", "Renamed", "--map-chars", "#█"])
        .arg(fixture())
        .arg(&out)
        .assert()
        .success();
    let json = std::fs::read_to_string(out).unwrap();
    assert!(json.contains("\"name\": \"Renamed\""));
    assert!(json.contains("█ █"));
    assert!(!json.contains("\"# #\""));
}

#[test]
fn convert_debug_selected_chars() {
    let dir = tempfile::tempdir().unwrap();
    flf2bit()
        .args(["convert", "--debug=#"])
        .arg(fixture())
        .arg(dir.path().join("out.bit"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing character '#' (ASCII 35)"))
        .stdout(predicate::str::contains("\"#$#\""))
        .stdout(predicate::str::contains("(ASCII 33)").not());
}

#[test]
fn convert_debug_all_chars() {
    let dir = tempfile::tempdir().unwrap();
    flf2bit()
        .args(["convert", "--debug"])
        .arg(fixture())
        .arg(dir.path().join("out.bit"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(ASCII 32)"))
        .stdout(predicate::str::contains("(ASCII 35)"));
}

#[test]
fn convert_rejects_short_map_pair() {
    let dir = tempfile::tempdir().unwrap();
    flf2bit()
        .args(["convert", "--map-chars", "#"])
        .arg(fixture())
        .arg(dir.path().join("out.bit"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected two characters"));
}

#[test]
fn convert_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    flf2bit()
        .arg("convert")
        .arg(dir.path().join("nope.flf"))
        .arg(dir.path().join("out.bit"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("opening"));
}

#[test]
fn inspect_shows_header() {
    flf2bit()
        .arg("inspect")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("FIGlet font: Mini Fixture"))
        .stdout(predicate::str::contains("Hardblank: '$'"))
        .stdout(predicate::str::contains("Height: 3"))
        .stdout(predicate::str::contains("Comment lines: 3"))
        .stdout(predicate::str::contains("Converted characters: 4"));
}

#[test]
fn check_accepts_consistent_font() {
    let dir = tempfile::tempdir().unwrap();
    let out = convert_fixture(dir.path());
    flf2bit()
        .arg("check")
        .arg(out)
        .assert()
        .success()
        .stdout(predicate::str::contains("all 4 characters have consistent widths"));
}

#[test]
fn check_rejects_ragged_glyph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.bit");
    std::fs::write(
        &path,
        r#"{"name":"r","author":"a","license":"l","characters":{"A":["ab","a"]}}"#,
    )
    .unwrap();
    flf2bit()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("'A' (ASCII 65): widths [2, 1]"))
        .stderr(predicate::str::contains("inconsistent widths"));
}

#[test]
fn render_text() {
    let dir = tempfile::tempdir().unwrap();
    let out = convert_fixture(dir.path());
    flf2bit()
        .arg("render")
        .arg(&out)
        .arg("!#")
        .assert()
        .success()
        .stdout(predicate::str::contains(" |# #\n |###\n .# #\n"));
}

#[test]
fn render_unknown_char_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = convert_fixture(dir.path());
    flf2bit()
        .arg("render")
        .arg(&out)
        .arg("Z")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character"));
}
