//! Directory scanning tests for `typenames-detector`.
//!
//! Each `#[case]` gets an isolated `TempDir`; no shared state.

use std::collections::HashSet;
use std::fs;

use rstest::rstest;
use tempfile::TempDir;
use typenames_detector::{scan_names, ChangeDetector};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn dir_with(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for file in files {
        fs::write(dir.path().join(file), "").expect("write fixture");
    }
    dir
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[rstest]
#[case(&["a.ts", "b.ts"], ".ts", &["a", "b"])]
#[case(&["a.ts", "b.tsx", "c.js", "README.md"], ".ts", &["a"])]
#[case(&["icon.svg", "logo.SVG", "x.svg.bak"], ".svg", &["icon"])]
#[case(&["Button.module.css", "base.css"], ".module.css", &["Button"])]
#[case(&["notes.txt"], ".ts", &[])]
fn keeps_only_suffix_matches(
    #[case] files: &[&str],
    #[case] suffix: &str,
    #[case] expected: &[&str],
) {
    let dir = dir_with(files);
    let names = sorted(scan_names(dir.path(), suffix));
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(names, expected);
}

#[test]
fn directories_with_matching_names_are_listed_too() {
    let dir = dir_with(&["a.ts"]);
    fs::create_dir(dir.path().join("nested.ts")).expect("mkdir");
    let names = sorted(scan_names(dir.path(), ".ts"));
    assert_eq!(names, vec!["a".to_string(), "nested".to_string()]);
}

#[test]
fn does_not_descend_into_subdirectories() {
    let dir = dir_with(&["top.ts"]);
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    fs::write(dir.path().join("sub").join("inner.ts"), "").expect("write");
    assert_eq!(scan_names(dir.path(), ".ts"), vec!["top".to_string()]);
}

#[test]
fn missing_directory_yields_empty_sequence() {
    let dir = TempDir::new().expect("tempdir");
    let names = scan_names(&dir.path().join("does-not-exist"), ".ts");
    assert!(names.is_empty());
}

#[test]
fn file_path_instead_of_directory_yields_empty_sequence() {
    let dir = dir_with(&["a.ts"]);
    assert!(scan_names(&dir.path().join("a.ts"), ".ts").is_empty());
}

#[test]
fn scan_feeds_detector_as_a_set() {
    let dir = dir_with(&["a.ts", "b.ts", "c.ts"]);
    let first = scan_names(dir.path(), ".ts");

    let mut detector = ChangeDetector::new();
    assert!(detector.has_changed(&first));
    detector.accept(&first);

    let second = scan_names(dir.path(), ".ts");
    assert!(!detector.has_changed(&second));

    fs::remove_file(dir.path().join("b.ts")).expect("remove");
    let third = scan_names(dir.path(), ".ts");
    assert!(detector.has_changed(&third));

    let cached: HashSet<&str> = detector.cached().iter().map(String::as_str).collect();
    assert_eq!(cached, HashSet::from(["a", "b", "c"]));
}
