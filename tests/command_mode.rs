//! Integration tests for command mode (-c/--command flag)

use std::path::Path;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheets"))
        // Tests must not depend on a user's ~/.config/sheets/config.toml.
        .arg("--config")
        .arg(empty_config())
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn empty_config() -> String {
    let path = std::env::temp_dir().join("sheets-command-mode-config.toml");
    std::fs::write(&path, "").expect("write empty config");
    path.display().to_string()
}

fn write_sheet(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write sheet");
    path.display().to_string()
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "2+3*4"]);
    assert_eq!(stdout.trim(), "14");
    assert_eq!(code, 0);
}

#[test]
fn test_auto_prepend_equals() {
    let (stdout1, _, _) = run_command(&["-c", "(2+3)*4"]);
    let (stdout2, _, _) = run_command(&["-c", "=(2+3)*4"]);
    assert_eq!(stdout1.trim(), "20");
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_functions() {
    let (stdout, _, code) = run_command(&["-c", "ABS(-5) + LEN(\"abc\")"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "(2+3"]);
    assert_eq!(stdout.trim(), "#ERR: Mismatched parentheses");
    assert_eq!(code, 1);
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert_eq!(stdout.trim(), "#INF!");
    assert_eq!(code, 0);
}

#[test]
fn test_formula_against_sheet_file() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(dir.path(), "data.sheet", "A1: =2+2\nB1: 3\n");
    let (stdout, _, code) = run_command(&[&sheet, "-c", "A1*10+B1"]);
    assert_eq!(stdout.trim(), "43");
    assert_eq!(code, 0);
}

#[test]
fn test_list_cells() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(dir.path(), "list.sheet", "B1: =A1*2\nA1: 21\nA2: =B1+\n");
    let (stdout, _, code) = run_command(&[&sheet]);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "A1: 21");
    assert_eq!(lines[1], "B1: 42");
    assert!(lines[2].starts_with("A2: #ERR: Wrong number of arguments"));
    assert_eq!(code, 0);
}

#[test]
fn test_circular_reference() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(dir.path(), "cycle.sheet", "A1: =B1\nB1: =A1\n");
    let (stdout, _, code) = run_command(&[&sheet, "-c", "A1"]);
    assert_eq!(stdout.trim(), "#ERR: Circular reference: A1 -> B1 -> A1");
    assert_eq!(code, 1);
}

#[test]
fn test_markdown_export() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(dir.path(), "export.sheet", "A1: =SIN(0)\n");
    let out = dir.path().join("out.md");
    let (_, _, code) = run_command(&[&sheet, "-o", &out.display().to_string()]);
    assert_eq!(code, 0);
    let md = std::fs::read_to_string(out).unwrap();
    assert!(md.contains("| 1 | 0 |"));
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--bogus"]);
    assert!(stderr.contains("Unknown option: --bogus"));
    assert_eq!(code, 1);
}
