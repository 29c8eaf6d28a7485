//! CLI integration tests for docmap.
//!
//! These tests focus on exit codes and behavioral verification against
//! real files in temp directories; exact tree art is covered by the
//! renderer's unit tests.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a docmap command.
fn docmap() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("docmap").unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// A small document with nested sections, terms, and a reference.
const GUIDE: &str = "\
# User Guide

Getting started with the **installer** and the `docmap` binary.

## Setup

Run the `install` script, then check [the API](api.md#auth).

### Advanced

Tuning knobs live here.

## Usage

Day to day commands.
";

/// Disables colors so assertions can match raw output.
const PLAIN_CONFIG: &str = "[render]\ncolor = false\n";

mod single_file {
    use super::*;

    #[test]
    fn maps_a_markdown_file() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        let output = docmap()
            .current_dir(dir.path())
            .arg("guide.md")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let stdout = String::from_utf8(output).unwrap();

        assert!(stdout.contains(" guide.md "));
        assert!(stdout.contains("User Guide"));
        assert!(stdout.contains("├── Setup"));
        assert!(stdout.contains("└── Usage"));
        assert!(stdout.contains("Advanced"));
    }

    #[test]
    fn default_output_is_colored() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

        let output = docmap()
            .current_dir(dir.path())
            .arg("guide.md")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let stdout = String::from_utf8(output).unwrap();

        assert!(stdout.contains('\u{1b}'));
        assert!(strip_ansi(&stdout).contains("User Guide"));
    }

    #[test]
    fn section_filter_roots_the_tree() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--section", "setup"])
            .assert()
            .success()
            .stdout(predicate::str::contains("╭── Setup"))
            .stdout(predicate::str::contains("Advanced"))
            .stdout(predicate::str::contains("Usage").not());
    }

    #[test]
    fn missing_section_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

        docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--section", "nonexistent"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn expand_prints_section_content() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--expand", "usage"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Day to day commands."));
    }

    #[test]
    fn refs_lists_outgoing_links() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--refs"])
            .assert()
            .success()
            .stdout(predicate::str::contains("the API"))
            .stdout(predicate::str::contains("api.md"));
    }

    #[test]
    fn missing_target_fails() {
        let dir = temp_dir();

        docmap()
            .current_dir(dir.path())
            .arg("absent.md")
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn unsupported_extension_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("notes.txt"), "plain text").unwrap();

        docmap()
            .current_dir(dir.path())
            .arg("notes.txt")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsupported"));
    }

    #[test]
    fn invalid_pdf_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("broken.pdf"), "not a pdf at all").unwrap();

        docmap()
            .current_dir(dir.path())
            .arg("broken.pdf")
            .assert()
            .failure();
    }
}

mod json {
    use super::*;

    #[test]
    fn emits_structured_output() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

        let output = docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["total_docs"], 1);
        let doc = &json["documents"][0];
        assert_eq!(doc["filename"], "guide.md");
        let root = &doc["sections"][0];
        assert_eq!(root["title"], "User Guide");
        assert_eq!(root["level"], 1);
        assert_eq!(root["children"][0]["title"], "Setup");
        assert_eq!(root["children"][0]["children"][0]["title"], "Advanced");
        assert_eq!(doc["references"][0]["target"], "api.md");

        // Roots roll up their descendants' tokens.
        let child_tokens = root["children"][0]["tokens"].as_u64().unwrap();
        assert!(root["tokens"].as_u64().unwrap() >= child_tokens);
    }

    #[test]
    fn key_terms_are_bounded() {
        let dir = temp_dir();
        fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

        let output = docmap()
            .current_dir(dir.path())
            .args(["guide.md", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let terms = json["documents"][0]["sections"][0]["key_terms"]
            .as_array()
            .unwrap();
        assert!(terms.len() <= 5);
        assert!(terms.iter().any(|t| t == "installer"));
    }
}

mod directory {
    use super::*;

    #[test]
    fn maps_all_files_with_totals() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.md"), "# Alpha\n\ntext\n").unwrap();
        fs::write(dir.path().join("b.md"), "# Beta\n\nmore text\n").unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        let output = docmap()
            .arg(dir.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let stdout = String::from_utf8(output).unwrap();

        assert!(stdout.contains("2 files"));
        assert!(stdout.contains("├── a.md"));
        assert!(stdout.contains("└── b.md"));
        assert!(stdout.contains("Alpha"));
        assert!(stdout.contains("Beta"));
    }

    #[test]
    fn nested_files_use_relative_paths() {
        let dir = temp_dir();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.md"), "# Deep\n").unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("sub/deep.md"));
    }

    #[test]
    fn config_excludes_are_applied() {
        let dir = temp_dir();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("wip.md"), "# WIP\n").unwrap();
        fs::write(dir.path().join("final.md"), "# Final\n").unwrap();
        fs::write(
            dir.path().join(".docmap.toml"),
            "[scan]\nexclude = [\"drafts/**\"]\n\n[render]\ncolor = false\n",
        )
        .unwrap();

        docmap()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("final.md"))
            .stdout(predicate::str::contains("wip.md").not());
    }

    #[test]
    fn malformed_config_is_fatal() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.md"), "# A\n").unwrap();
        fs::write(dir.path().join(".docmap.toml"), "[scan\n").unwrap();

        docmap()
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("parse"));
    }

    #[test]
    fn broken_pdf_is_skipped() {
        let dir = temp_dir();
        fs::write(dir.path().join("good.md"), "# Good\n").unwrap();
        fs::write(dir.path().join("broken.pdf"), "not a pdf").unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("good.md"))
            .stderr(predicate::str::contains("skipping broken.pdf"));
    }

    #[test]
    fn empty_directory_fails() {
        let dir = temp_dir();

        docmap()
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("No markdown or PDF files"));
    }

    #[test]
    fn refs_finds_hub_documents() {
        let dir = temp_dir();
        fs::write(
            dir.path().join("a.md"),
            "# A\n\nSee [the guide](guide.md).\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.md"),
            "# B\n\nAlso [the guide](guide.md#top).\n",
        )
        .unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .arg(dir.path())
            .arg("--refs")
            .assert()
            .success()
            .stdout(predicate::str::contains("Most referenced"))
            .stdout(predicate::str::contains("guide.md ← 2 documents"));
    }

    #[test]
    fn section_filter_searches_all_documents() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.md"), "# Alpha\n").unwrap();
        fs::write(dir.path().join("b.md"), GUIDE).unwrap();
        fs::write(dir.path().join(".docmap.toml"), PLAIN_CONFIG).unwrap();

        docmap()
            .arg(dir.path())
            .args(["--section", "setup"])
            .assert()
            .success()
            .stdout(predicate::str::contains("╭── Setup"));
    }

    #[test]
    fn json_covers_all_documents() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.md"), "# Alpha\n\nfour word line here\n").unwrap();
        fs::write(dir.path().join("b.md"), "# Beta\n\nanother few words here\n").unwrap();

        let output = docmap()
            .arg(dir.path())
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["total_docs"], 2);
        let names: Vec<&str> = json["documents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["filename"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
        let sum: u64 = json["documents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["tokens"].as_u64().unwrap())
            .sum();
        assert_eq!(json["total_tokens"].as_u64().unwrap(), sum);
    }
}
