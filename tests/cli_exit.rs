// tests/cli_exit.rs
//! Exit codes and output of the `seamcheck` binary.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn workspace(config: Option<&str>, files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    if let Some(toml) = config {
        fs::write(dir.path().join("seamcheck.toml"), toml).expect("write seamcheck.toml");
    }
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seamcheck"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("failed to execute seamcheck")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not valid JSON: {e}\n---\n{stdout}"))
}

const TWO_COMPONENTS: &str = "[components]\nhal = [\"hal/\"]\nkernel = [\"kernel/\"]\n";

#[test]
fn test_exit_0_clean() {
    let dir = workspace(
        Some(TWO_COMPONENTS),
        &[
            ("hal/hal_interface.h", "void hal_init(void);\n"),
            ("kernel/main.c", "#include \"hal_interface.h\"\n"),
        ],
    );
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("No dependency issues found"));
}

#[test]
fn test_exit_1_on_unresolved_with_json() {
    let dir = workspace(
        Some(TWO_COMPONENTS),
        &[
            ("hal/hal_interface.h", "void hal_init(void);\n"),
            ("kernel/main.c", "#include \"sched_interface.h\"\n"),
        ],
    );
    let out = run(&dir, &["check", "--json"]);
    assert_eq!(out.status.code(), Some(1));

    let json = parse_stdout(&out);
    assert_eq!(json["summary"]["errors"], 1);
    assert_eq!(json["issues"][0]["kind"], "unresolved");
    assert_eq!(json["issues"][0]["component"], "kernel");
    assert_eq!(json["issues"][0]["interface"], "sched_interface.h");
    assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn test_exit_3_without_config() {
    let dir = workspace(None, &[("kernel/main.c", "int main(void) { return 0; }\n")]);
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Configuration file not found"));
}

#[test]
fn test_exit_3_on_invalid_config() {
    let dir = workspace(Some("[components]\nkernel = []\n"), &[]);
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_output_file_written() {
    let dir = workspace(
        Some(TWO_COMPONENTS),
        &[
            ("hal/hal_interface.h", "void hal_init(void);\n"),
            ("kernel/main.c", "#include \"hal_interface.h\"\n"),
        ],
    );
    let out = run(&dir, &["check", "--output", "report.txt"]);
    assert_eq!(out.status.code(), Some(0));
    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(report.contains("seamcheck dependency report"));
    assert!(!report.contains('\u{1b}'));
}

#[test]
fn test_components_listing() {
    let dir = workspace(
        Some(TWO_COMPONENTS),
        &[
            ("hal/hal_interface.h", "void hal_init(void);\n"),
            ("kernel/main.c", "#include \"hal_interface.h\"\n"),
        ],
    );
    let out = run(&dir, &["components", "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let json = parse_stdout(&out);
    assert_eq!(json[0]["name"], "hal");
    assert_eq!(json[0]["provided"][0], "hal_interface.h");
    assert_eq!(json[1]["required"][0], "hal_interface.h");
}
