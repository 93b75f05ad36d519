use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

const NESTED: &str = r#"{
    "operator": "AND",
    "parameters": [
        { "column": "a", "op": "Eq", "value": { "Bool": true } },
        { "column": "b", "op": "Eq", "value": { "Bool": true } }
    ],
    "children": [
        {
            "operator": "OR",
            "parameters": [
                { "column": "c", "op": "Eq", "value": { "Bool": true } },
                { "column": "d", "op": "Eq", "value": { "Bool": true } }
            ]
        }
    ]
}"#;

fn querydnf() -> Command {
    Command::new(env!("CARGO_BIN_EXE_querydnf"))
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = querydnf()
        .args(args)
        .env_remove("QUERYDNF_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("querydnf should spawn");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("stdin should accept input");

    child.wait_with_output().expect("querydnf should exit")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture should be written");
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "querydnf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn transform_distributes_over_nested_disjunction() {
    let output = stdout_json(&run_with_stdin(&["transform"], NESTED));

    assert_eq!(output["operator"], "OR");
    let children = output["children"]
        .as_array()
        .expect("children should be an array");
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["operator"], "AND");
    assert_eq!(children[0]["parameters"][2]["column"], "c");
    assert_eq!(children[1]["parameters"][2]["column"], "d");
}

#[test]
fn transform_with_fingerprint_wraps_output() {
    let output = stdout_json(&run_with_stdin(&["transform", "--fingerprint"], NESTED));

    let fingerprint = output["fingerprint"]
        .as_str()
        .expect("fingerprint should be a string");
    assert_eq!(fingerprint.len(), 64);
    assert_eq!(output["predicate"]["operator"], "OR");
}

#[test]
fn transform_trace_goes_to_stderr() {
    let output = run_with_stdin(&["transform", "--trace"], NESTED);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("trace: start"));
    assert!(stderr.contains("trace: distribute factors=2 disjuncts=2"));
    assert!(stderr.contains("trace: finish"));
}

#[test]
fn transform_respects_config_limit() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = write(dir.path(), "querydnf.toml", "[transform]\nmax_disjuncts = 1\n");

    let output = run_with_stdin(&["transform", "--config", &config], NESTED);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("query:unsupported"), "stderr: {stderr}");
}

#[test]
fn check_reports_shape() {
    let before = stdout_json(&run_with_stdin(&["check"], NESTED));
    assert_eq!(before["dnf"], false);

    let transformed = run_with_stdin(&["transform"], NESTED);
    let transformed = String::from_utf8_lossy(&transformed.stdout).into_owned();
    let after = stdout_json(&run_with_stdin(&["check"], &transformed));
    assert_eq!(after["dnf"], true);
}

#[test]
fn eval_reads_row_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = write(dir.path(), "predicate.json", NESTED);
    let matching = write(
        dir.path(),
        "matching.json",
        r#"{ "fields": { "a": { "Bool": true }, "b": { "Bool": true }, "d": { "Bool": true } } }"#,
    );
    let missing = write(
        dir.path(),
        "missing.json",
        r#"{ "fields": { "a": { "Bool": true }, "b": { "Bool": true } } }"#,
    );

    let output = querydnf()
        .args(["eval", "--input", &input, "--row", &matching])
        .output()
        .expect("querydnf should run");
    assert_eq!(stdout_json(&output)["matches"], true);

    let output = querydnf()
        .args(["eval", "--input", &input, "--row", &missing])
        .output()
        .expect("querydnf should run");
    assert_eq!(stdout_json(&output)["matches"], false);
}

#[test]
fn malformed_json_fails() {
    let output = run_with_stdin(&["transform"], "{ not json");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid json"));
}
