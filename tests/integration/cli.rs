//! Integration tests for the `charmeleon` command line

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the charmeleon binary next to the test executable
fn charmeleon_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // test executable
    path.pop(); // deps
    path.push(format!("charmeleon{}", std::env::consts::EXE_SUFFIX));
    path
}

fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(charmeleon_bin()).args(args).output().unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

const PROGRAM: &str = r#"func main() {
    var x: int = 3;
    while (x > 0) {
        print(x);
        x = x - 1;
    }
}
"#;

#[test]
fn test_build_writes_python() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "countdown.charm", PROGRAM);

    let output = run(&["build", path_arg(&file)]);
    assert!(output.status.success());

    let python = fs::read_to_string(dir.path().join("countdown.py")).unwrap();
    assert!(python.starts_with("def main():\n    x = 3\n    while x > 0:\n"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SensitiveDataExposure"));
}

#[test]
fn test_build_with_output_path() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "prog.charm", "print(1);");
    let out = dir.path().join("out.py");

    let output = run(&["build", path_arg(&file), "-o", path_arg(&out)]);
    assert!(output.status.success());
    assert!(fs::read_to_string(out).unwrap().contains("__global_main__()"));
}

#[test]
fn test_check_reports_errors_with_snippet() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bad.charm", "var x: int = 1;\nprint(y);\n");

    let output = run(&["check", path_arg(&file)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Undeclared variable 'y'"));
    assert!(stderr.contains("2 | print(y);"));
    assert!(stderr.contains("could not compile"));
}

#[test]
fn test_check_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "ok.charm", PROGRAM);

    let output = run(&["check", path_arg(&file)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("no errors found"));
}

#[test]
fn test_ir_command() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "prog.charm", PROGRAM);

    let output = run(&["ir", path_arg(&file)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("FUNC main:\nASSIGN x, 3\nL1:\n"));
}

#[test]
fn test_scan_json() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "scan.charm", "var pw = \"x\"; print(pw);");

    let output = run(&["scan", path_arg(&file), "--format", "json"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report[0]["kind"], "SensitiveDataExposure");
}

#[test]
fn test_structure_command() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "prog.ir", "FUNC main:\nASSIGN y, 20\nPRINT 1\nEND_FUNC main\n");

    let optimized = run(&["structure", path_arg(&file)]);
    assert!(optimized.status.success());
    assert_eq!(String::from_utf8_lossy(&optimized.stdout), "def main():\n    print(1)\n");

    let raw = run(&["structure", path_arg(&file), "--no-dce"]);
    assert_eq!(
        String::from_utf8_lossy(&raw.stdout),
        "def main():\n    y = 20\n    print(1)\n"
    );
}

#[test]
fn test_structure_top_level_listing() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "top.ir", "ASSIGN x, 10\nASSIGN y, 20\nPRINT x\n");

    let output = run(&["structure", path_arg(&file)]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "def __global_main__():\n    x = 10\n    print(x)\n\nif __name__ == '__main__':\n    __global_main__()\n"
    );
}

#[test]
fn test_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = create_test_file(&dir, "custom.toml", "[codegen]\nindent_width = 2\n");
    let file = create_test_file(&dir, "prog.ir", "FUNC main:\nPRINT 1\nEND_FUNC main\n");

    let output = run(&[
        "--config",
        path_arg(&config),
        "structure",
        path_arg(&file),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "def main():\n  print(1)\n");
}

#[test]
fn test_version() {
    let output = run(&["version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Charmeleon "));
}
