use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const INTRO_DOC: &str = "\\label{sec:intro}\nSee \\ref{sec:intro} for details.\n\\label{sec:unused}\n";

fn temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir()
        .join("texref_cli_tests")
        .join(format!("{}_{}", std::process::id(), id));
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn texref() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_texref"));
    cmd.env_remove("RUST_LOG").env_remove("COLUMNS");
    cmd
}

fn run(args: &[&str]) -> Output {
    texref().args(args).output().expect("failed to run texref")
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
fn report_lists_unused_and_used_labels() {
    let dir = temp_dir();
    let file = dir.join("main.tex");
    write(&file, INTRO_DOC);
    let name = file.to_str().unwrap();

    let out = run(&[name, "--color", "never", "--width", "80"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected = format!(
        "sec:intro (defined at {name}:1:7) is referenced 1 times:\n    {name}:2:9:\n        See ref{{sec:intro}} for details.\n\nsec:unused (defined at {name}:3:7) is NOT referenced!\n\n"
    );
    assert_eq!(stdout, expected);
}

#[test]
fn check_flag_is_a_no_op() {
    let dir = temp_dir();
    let file = dir.join("main.tex");
    write(&file, INTRO_DOC);
    let name = file.to_str().unwrap();

    let plain = run(&[name, "--color", "never"]);
    let checked = run(&["--check", "-vv", name, "--color", "never"]);
    assert!(checked.status.success());
    assert_eq!(plain.stdout, checked.stdout);
}

#[test]
fn reads_standard_input_for_dash() {
    let mut child = texref()
        .args(["-", "--color", "never"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start texref");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"\\label{eq:1}\n\\eqref{eq:1}\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("eq:1 (defined at <stdin>:1:7) is referenced 1 times:"));
    assert!(stdout.contains("    <stdin>:2:7:"));
}

#[test]
fn missing_file_exits_with_one() {
    let dir = temp_dir();
    let file = dir.join("absent.tex");

    let out = run(&[file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("absent.tex"));
}

#[test]
fn json_output_includes_dangling_references() {
    let dir = temp_dir();
    let file = dir.join("main.tex");
    write(&file, "\\label{a}\n\\ref{a}\n\\ref{nope}\n");

    let out = run(&[file.to_str().unwrap(), "--json"]);
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["labels"][0]["name"], "a");
    assert_eq!(value["labels"][0]["count"], 1);
    assert_eq!(value["dangling"][0]["name"], "nope");
}

#[test]
fn config_file_next_to_document_selects_json() {
    let dir = temp_dir();
    let file = dir.join("main.tex");
    write(&file, INTRO_DOC);
    write(&dir.join("texref.toml"), "[output]\nformat = \"json\"\n");

    let out = run(&[file.to_str().unwrap()]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["stats"]["unused_labels"], 1);
}

#[test]
fn inputs_prints_tree() {
    let dir = temp_dir();
    write(&dir.join("main.tex"), "\\input{body}\n");
    write(&dir.join("body.tex"), "\\input{appendix}\n");
    write(&dir.join("appendix.tex"), "done\n");

    let out = run(&[dir.join("main.tex").to_str().unwrap(), "--inputs"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("main.tex"));
    assert!(lines[1].starts_with("    ") && lines[1].ends_with("body.tex"));
    assert!(lines[2].starts_with("        ") && lines[2].ends_with("appendix.tex"));
}

#[test]
fn flatten_to_stdout() {
    let dir = temp_dir();
    write(&dir.join("main.tex"), "\\label{x}\n\\input{part}\n\\ref{x}\n");
    write(&dir.join("part.tex"), "inside\n");

    let out = run(&[dir.join("main.tex").to_str().unwrap(), "--flatten", "-"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "\\label{x}\ninside\n\\ref{x}\n"
    );
}

#[test]
fn flatten_rejects_parent_traversal() {
    let dir = temp_dir();
    write(&dir.join("main.tex"), "text\n");

    let out = run(&[dir.join("main.tex").to_str().unwrap(), "--flatten", "../out.tex"]);
    assert_eq!(out.status.code(), Some(1));
}
