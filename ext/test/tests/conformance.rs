//! Fixture-driven conformance: every `fixtures/<group>/*.yaml` document is
//! compiled into a condition set and run over its cases.
//!
//! Run with: cargo test -p xmlsift-test --test conformance

use std::fs;
use std::path::{Path, PathBuf};
use xmlsift_test::fixture::Fixture;

const GROUPS: &[&str] = &["01_extraction", "02_conditions", "03_case"];

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}

fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
    let mut files: Vec<PathBuf> = entries
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    files.sort();
    files
}

/// Run one group and report every failing case at once.
fn assert_group(group: &str) {
    let files = yaml_files(&fixtures_root().join(group));
    assert!(!files.is_empty(), "fixture group {group} is empty");

    let mut cases = 0;
    let mut failures = Vec::new();
    for path in &files {
        let yaml = fs::read_to_string(path).expect("read fixture");
        let fixtures = Fixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));

        for fixture in &fixtures {
            for result in fixture.run() {
                cases += 1;
                if !result.passed {
                    failures.push(format!(
                        "{} / {} / {}: expected {:?}, got {:?}",
                        path.file_name().unwrap_or_default().to_string_lossy(),
                        fixture.name,
                        result.case_name,
                        result.expected,
                        result.actual
                    ));
                }
            }
        }
    }

    assert!(cases > 0, "fixture group {group} has no cases");
    assert!(
        failures.is_empty(),
        "{} of {cases} case(s) failed in {group}:\n  {}",
        failures.len(),
        failures.join("\n  ")
    );
}

#[test]
fn extraction() {
    assert_group("01_extraction");
}

#[test]
fn conditions() {
    assert_group("02_conditions");
}

#[test]
fn case_sensitivity() {
    assert_group("03_case");
}

#[test]
fn every_group_on_disk_is_run() {
    let mut on_disk: Vec<String> = fs::read_dir(fixtures_root())
        .expect("list fixtures")
        .map(|entry| entry.expect("dir entry"))
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    on_disk.sort();
    assert_eq!(on_disk, GROUPS);
}
