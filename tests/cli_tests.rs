mod common;

use regex::Regex;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn run(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_autoperm"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn autoperm");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_substitution_encrypt_from_stdin() {
    let output = run(
        &["encrypt", "--cipher", "substitution", "--keys", "zebra", "-b", "0"],
        "abc xyz",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "ZEBWXY\n");
}

#[test]
fn test_autoperm_round_trip_with_preserve() {
    let original = "Attack at dawn, hold the bridge!\n";
    let keys = ["-k", "linustorvalds", "-k", "richardstallman", "--preserve"];

    let mut encrypt_args = vec!["encrypt"];
    encrypt_args.extend_from_slice(&keys);
    let encrypted = run(&encrypt_args, original);
    assert!(encrypted.status.success(), "stderr: {}", stderr(&encrypted));
    let ciphertext = stdout(&encrypted);
    assert_ne!(ciphertext, original);

    let mut decrypt_args = vec!["decrypt"];
    decrypt_args.extend_from_slice(&keys);
    let decrypted = run(&decrypt_args, &ciphertext);
    assert!(decrypted.status.success(), "stderr: {}", stderr(&decrypted));
    assert_eq!(stdout(&decrypted), original);
}

#[test]
fn test_files_in_and_out() {
    let mut input = NamedTempFile::new().unwrap();
    write!(input, "ABCDAB").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("out.txt");

    let output = run(
        &[
            "encrypt",
            input.path().to_str().unwrap(),
            out_path.to_str().unwrap(),
            "--key",
            "a",
            "--key",
            "b",
            "-b",
            "0",
        ],
        "",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(written.trim().len(), 6);
}

#[test]
fn test_input_file_after_single_key() {
    let mut input = NamedTempFile::new().unwrap();
    write!(input, "abcxyz").unwrap();

    let output = run(
        &[
            "encrypt",
            "--cipher",
            "substitution",
            "--key",
            "zebra",
            input.path().to_str().unwrap(),
            "-b",
            "0",
        ],
        "",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "ZEBWXY\n");
}

#[test]
fn test_input_file_after_key_pair() {
    let mut input = NamedTempFile::new().unwrap();
    write!(input, "ABCDAB").unwrap();

    let output = run(
        &[
            "encrypt",
            "-k",
            "a",
            "-k",
            "b",
            input.path().to_str().unwrap(),
            "-b",
            "0",
        ],
        "",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim().len(), 6);
}

#[test]
fn test_missing_keys_fail() {
    let output = run(&["encrypt"], "hello");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no key given"));
}

#[test]
fn test_wrong_key_count_fails() {
    let output = run(&["encrypt", "--keys", "onlyone"], "hello");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("takes 2 key(s)"));
}

#[test]
fn test_too_many_keys_fail() {
    let output = run(
        &["encrypt", "--cipher", "substitution", "-k", "zebra", "-k", "omega"],
        "hello",
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("takes 1 key(s), got 2"));
}

#[test]
fn test_random_keys_are_reported() {
    let output = run(&["encrypt", "--random", "--verbose"], "hello world");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let re = Regex::new(r"Sigma: [A-Z]{26}").unwrap();
    assert!(re.is_match(&stderr(&output)));
    assert_eq!(stdout(&output).trim().replace(' ', "").len(), 10);
}

#[test]
fn test_score_reports_numbers() {
    let table = common::full_quadgram_file("2.0");
    let output = run(
        &["score", "--quadgrams", table.path().to_str().unwrap()],
        "the quick brown fox",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let re = Regex::new(r"Quadgram score:\s+26\.0000").unwrap();
    assert!(re.is_match(&stdout(&output)), "stdout: {}", stdout(&output));
}

#[test]
fn test_missing_quadgrams_fail() {
    let output = run(&["score", "--quadgrams", "/nonexistent/quadgrams.dat"], "abc");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Could not open quadgram table"));
}

#[test]
fn test_crack_json_report() {
    let table = common::full_quadgram_file("1.0");
    let output = run(
        &[
            "crack",
            "--quadgrams",
            table.path().to_str().unwrap(),
            "--strategy",
            "autoperm",
            "--max-evaluations",
            "40",
            "-S",
            "3",
            "--json",
        ],
        "BADCCB BADCCB",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["strategy"], "autoperm");
    assert_eq!(report["evaluated"], 40);
    assert_eq!(report["stop_reason"], "budget_exhausted");
    assert_eq!(report["plaintext"].as_str().unwrap().len(), 12);
}

#[test]
fn test_crack_reads_config_file() {
    let table = common::full_quadgram_file("1.0");
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"{{ "search": {{ "max_evaluations": 25 }} }}"#).unwrap();

    let output = run(
        &[
            "crack",
            "--quadgrams",
            table.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
            "--json",
        ],
        "HELLOWORLD",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["evaluated"], 25);
    assert_eq!(report["strategy"], "substitution");
}
