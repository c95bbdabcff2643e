//! Tests for the txtplate binary.

use assert_cmd::Command;
use predicates::prelude::*;
use txtplate::test_utils::TestProject;

fn txtplate(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("txtplate").unwrap();
    cmd.current_dir(project.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_stdin_to_stdout() {
    let project = TestProject::new().unwrap();
    project.create_file("defaults.yaml", "greeting: Hello\nname: nobody\n").unwrap();
    project.create_file("values.json", r#"{"name": "world"}"#).unwrap();

    txtplate(&project)
        .args(["defaults.yaml", "values.json"])
        .write_stdin("{{ greeting }}, {{ name }}!\n")
        .assert()
        .success()
        .stdout("Hello, world!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_input_and_output_files() {
    let project = TestProject::new().unwrap();
    project.create_file("values.yml", "db:\n  host: localhost\n  port: 5432\n").unwrap();
    project.create_file("conn.tpl", "postgres://{{ db.host }}:{{ db.port }}").unwrap();

    txtplate(&project)
        .args(["-i", "conn.tpl", "--output", "out/conn.txt", "values.yml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(project.read_file("out/conn.txt").unwrap(), "postgres://localhost:5432");
}

#[test]
fn test_dump_values_json() {
    let project = TestProject::new().unwrap();
    project.create_file("a.json", r#"{"app": {"name": "demo", "replicas": 1}}"#).unwrap();
    project.create_file("b.yaml", "app:\n  replicas: 3\n").unwrap();

    let assert = txtplate(&project)
        .args(["--dump-values", "json", "a.json", "b.yaml"])
        .assert()
        .success();

    let stdout = &assert.get_output().stdout;
    let dumped: serde_json::Value = serde_json::from_slice(stdout).unwrap();
    assert_eq!(dumped, serde_json::json!({"app": {"name": "demo", "replicas": 3}}));
}

#[test]
fn test_missing_values_argument_is_usage_error() {
    let project = TestProject::new().unwrap();

    txtplate(&project)
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALUES_FILES"));
}

#[test]
fn test_missing_values_file() {
    let project = TestProject::new().unwrap();

    txtplate(&project)
        .arg("nope.json")
        .write_stdin("x")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("nope.json")));
}

#[test]
fn test_invalid_yaml_fails() {
    let project = TestProject::new().unwrap();
    project.create_file("bad.yaml", "a: [1, 2\n").unwrap();

    txtplate(&project)
        .arg("bad.yaml")
        .write_stdin("{{ a }}")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("bad.yaml")));
}

#[test]
fn test_yaml_extension_is_case_sensitive() {
    let project = TestProject::new().unwrap();
    // Read as JSON because of the upper-case extension
    project.create_file("values.YAML", "a: 1\n").unwrap();

    txtplate(&project)
        .arg("values.YAML")
        .write_stdin("{{ a }}")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("as json"));
}

#[test]
fn test_non_mapping_root_fails() {
    let project = TestProject::new().unwrap();
    project.create_file("list.json", "[1, 2, 3]").unwrap();

    txtplate(&project)
        .arg("list.json")
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected a mapping"));
}

#[test]
fn test_non_string_key_fails() {
    let project = TestProject::new().unwrap();
    project.create_file("keys.yaml", "true: yes\n").unwrap();

    txtplate(&project)
        .arg("keys.yaml")
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Key is not a string"));
}

#[test]
fn test_failed_render_leaves_output_untouched() {
    let project = TestProject::new().unwrap();
    project.create_file("values.json", r#"{"a": 1}"#).unwrap();
    project.create_file("out.txt", "previous").unwrap();

    txtplate(&project)
        .args(["-o", "out.txt", "values.json"])
        .write_stdin("{{ undefined_variable }}")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("undefined_variable"));

    assert_eq!(project.read_file("out.txt").unwrap(), "previous");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let project = TestProject::new().unwrap();
    project.create_file("values.json", r#"{"a": 1}"#).unwrap();

    txtplate(&project)
        .args(["--verbose", "values.json"])
        .write_stdin("{{ a }}")
        .assert()
        .success()
        .stdout("1")
        .stderr(predicate::str::contains("values.json"));
}
