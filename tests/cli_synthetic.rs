//! Fixture-driven CLI scenarios.
//!
//! Each case under `tests/fixtures/synthetic/<case>/` provides:
//! - `input/`        diary export (and optional config) copied to a temp directory
//! - `scenario.toml` commands to run there, with output assertions
//! - `expected/`     directory tree left behind once every command has run

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(rename = "command")]
    commands: Vec<CommandSpec>,
}

#[derive(Debug, Deserialize)]
struct CommandSpec {
    args: Vec<String>,
    #[serde(default)]
    expect_exit: i32,
    #[serde(default)]
    stdout_contains: Vec<String>,
    #[serde(default)]
    stdout_not_contains: Vec<String>,
    #[serde(default)]
    stderr_contains: Vec<String>,
}

#[test]
fn test_synthetic_fixtures() {
    let root = Path::new("tests").join("fixtures").join("synthetic");

    let mut cases: Vec<PathBuf> = fs::read_dir(&root)
        .unwrap_or_else(|e| panic!("Cannot read {}: {}", root.display(), e))
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    cases.sort();
    assert!(!cases.is_empty(), "No synthetic test cases found");

    for case in cases {
        run_case(&case);
    }
}

fn run_case(case_dir: &Path) {
    let name = case_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown-case>")
        .to_string();

    let scenario_path = case_dir.join("scenario.toml");
    let scenario: Scenario = fs::read_to_string(&scenario_path)
        .map_err(|e| e.to_string())
        .and_then(|text| toml::from_str(&text).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| panic!("Case '{}': bad {}: {}", name, scenario_path.display(), e));

    let temp = tempfile::TempDir::new().unwrap();
    for (rel, contents) in read_tree(&case_dir.join("input")) {
        let dest = temp.path().join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(dest, contents).unwrap();
    }

    for (idx, command) in scenario.commands.iter().enumerate() {
        let label = format!("Case '{}', command #{} {:?}", name, idx + 1, command.args);
        let output = run_injdiary(temp.path(), &command.args);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        assert_eq!(
            output.status.code().unwrap_or(-1),
            command.expect_exit,
            "{}: exit code mismatch.\nstdout:\n{}\nstderr:\n{}",
            label,
            stdout,
            stderr
        );

        check_output(&label, "stdout", &stdout, &command.stdout_contains, true);
        check_output(&label, "stdout", &stdout, &command.stdout_not_contains, false);
        check_output(&label, "stderr", &stderr, &command.stderr_contains, true);
    }

    let expected = read_tree(&case_dir.join("expected"));
    let actual = read_tree(temp.path());
    assert_eq!(
        expected.keys().collect::<Vec<_>>(),
        actual.keys().collect::<Vec<_>>(),
        "Case '{}': file set mismatch",
        name
    );
    for (rel, contents) in &expected {
        assert_eq!(
            contents.replace("\r\n", "\n"),
            actual[rel].replace("\r\n", "\n"),
            "Case '{}': contents differ in {}",
            name,
            rel.display()
        );
    }
}

fn check_output(label: &str, stream: &str, text: &str, needles: &[String], present: bool) {
    for needle in needles {
        assert_eq!(
            text.contains(needle.as_str()),
            present,
            "{}: expected {} {} {:?}.\n{}:\n{}",
            label,
            stream,
            if present { "to contain" } else { "to NOT contain" },
            needle,
            stream,
            text
        );
    }
}

fn run_injdiary(cwd: &Path, args: &[String]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_injdiary"))
        .current_dir(cwd)
        .env_remove("INJDIARY_FILE")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute injdiary with args {:?}: {}", args, e))
}

/// Every file under `root`, keyed by relative path
fn read_tree(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let contents = fs::read_to_string(e.path()).unwrap();
            (rel, contents)
        })
        .collect()
}
