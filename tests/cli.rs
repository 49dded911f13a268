//! Integration tests for the seo-assess CLI

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_seo-assess"));
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    command(dir)
        .args(args)
        .output()
        .expect("Failed to run command")
}

fn write_page(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_assess_page_as_json() {
    let temp = TempDir::new().unwrap();
    write_page(
        temp.path(),
        "post.md",
        "---\nkeyword: green tea\ntitle: Green tea guide\n---\n<p>Green tea is a drink.</p>\n",
    );

    let output = run(temp.path(), &["--format", "json", "post.md"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["pages_assessed"], 1);
    let ids: Vec<&str> = value["pages"][0]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids[0], "introductionKeyword");
    assert!(ids.contains(&"titleKeyword"));
}

#[test]
fn test_flags_override_front_matter() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "post.md", "---\nkeyword: coffee\n---\ntext\n");

    let output = run(
        temp.path(),
        &["--format", "compact", "--no-color", "--keyword", "tea", "--title", "tea time", "post.md"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("post.md: good: titleKeyword: "));
}

#[test]
fn test_stdin_input() {
    let temp = TempDir::new().unwrap();
    let mut child = command(temp.path())
        .args(["--format", "compact", "--no-color"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<p>Some text</p>")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<stdin>: bad: textLength: "));
}

#[test]
fn test_invalid_locale_fails_page() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "good.md", "text\n");
    write_page(temp.path(), "bad.md", "---\nlocale: not a locale\n---\ntext\n");

    let output = run(temp.path(), &["--no-color", "good.md", "bad.md"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid locale 'not a locale'"));
    assert!(stdout.contains("1 page assessed"));
}

#[test]
fn test_disable_rule() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "post.md", "text\n");

    let output = run(
        temp.path(),
        &["--format", "compact", "--disable", "textLength,titleWidth", "post.md"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("textLength"));
    assert!(!stdout.contains("titleWidth"));
    assert!(stdout.contains("externalLinks"));
}

#[test]
fn test_config_file() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "post.md", "text\n");
    fs::write(
        temp.path().join(".assessrc.yaml"),
        "rules:\n  enabled: [textLength]\noutput:\n  format: compact\n",
    )
    .unwrap();

    let output = run(temp.path(), &["--no-color", "post.md"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("post.md: bad: textLength: "));
}

#[test]
fn test_list_rules() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["--no-color", "--list-rules"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("15 assessments"));
    let intro = stdout.find("introductionKeyword").unwrap();
    let h1 = stdout.find("singleH1Assessment").unwrap();
    assert!(intro < h1);
}

#[test]
fn test_explain_unknown_rule() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["--no-color", "explain", "nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("'nope' not found"));
}

#[test]
fn test_init_writes_config() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["init", "--preset", "cornerstone"]);
    assert!(output.status.success());

    let content = fs::read_to_string(temp.path().join(".assessrc.yaml")).unwrap();
    assert!(content.contains("cornerstone"));

    let again = run(temp.path(), &["init"]);
    assert_eq!(again.status.code(), Some(1));
}

#[test]
fn test_facts_output() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "post.md", "<p>one two three</p>\n");

    let output = run(temp.path(), &["--no-color", "--facts", "post.md"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.trim_start().starts_with("wordCount") && l.trim_end().ends_with(" 3")));
}

#[test]
fn test_warns_about_locale_without_catalog() {
    let temp = TempDir::new().unwrap();
    write_page(temp.path(), "nl.md", "---\nlocale: nl_NL\n---\ntekst\n");
    write_page(temp.path(), "en.md", "---\nlocale: en_GB\n---\ntext\n");

    let output = run(temp.path(), &["--no-color", "nl.md", "en.md"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nl.md: page locale nl_NL has no catalog"));
    assert!(!stderr.contains("en.md"));
}

#[test]
fn test_parallel_setting_keeps_output() {
    let temp = TempDir::new().unwrap();
    write_page(
        temp.path(),
        "post.md",
        "---\nkeyword: tea\n---\n<h2>Tea</h2><p>Tea is a drink.</p>\n",
    );

    let parallel = run(temp.path(), &["--format", "compact", "post.md"]);
    fs::write(temp.path().join(".assessrc.yaml"), "engine:\n  parallel: false\n").unwrap();
    let sequential = run(temp.path(), &["--format", "compact", "post.md"]);

    assert!(parallel.status.success());
    assert_eq!(parallel.stdout, sequential.stdout);
}
