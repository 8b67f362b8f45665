use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TREE: &str = r#"{
  "_version": "1",
  "a": { "*": { "dependencies": { "b": "*" } } },
  "b": { "*": {} }
}"#;

#[allow(deprecated)]
fn neuron_cmd() -> Command {
    Command::cargo_bin("neuron").unwrap()
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("dependency.json"), TREE).unwrap();
    tmp
}

#[test]
fn test_render_emits_dependencies_first() {
    let tmp = project();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<script async src=\"/b@*/b.js\"></script><script async src=\"/a@*/a.js\"></script>",
        ))
        .stdout(predicate::str::contains("facade('a');"));
}

#[test]
fn test_render_with_combo() {
    let tmp = project();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "a", "--combo", "a,b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src=\"/a@*/a.js,b@*/b.js\""))
        .stdout(predicate::str::contains("src=\"/b@*/b.js\"").not());
}

#[test]
fn test_render_debug_is_multiline() {
    let tmp = project();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "a", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<script>\nneuron.config({loaded:[],"))
        .stdout(predicate::str::contains("async").not());
}

#[test]
fn test_render_uses_config_file() {
    let tmp = project();
    fs::write(
        tmp.path().join("Neuron.toml"),
        "[resolve]\nprefix = \"/mod\"\n\n[[facade]]\nid = \"a\"\ndata = { page = 1 }\n",
    )
    .unwrap();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src=\"/mod/b/*/b.js\""))
        .stdout(predicate::str::contains("facade('a', {\"page\":1});"));
}

#[test]
fn test_render_explicit_tree_path() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("deps.json"), TREE).unwrap();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "b", "--tree", "deps.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src=\"/b@*/b.js\""));
}

#[test]
fn test_render_without_tree_fails() {
    let tmp = TempDir::new().unwrap();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dependency.json"));
}

#[test]
fn test_render_malformed_tree_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("dependency.json"), "{ not json").unwrap();

    neuron_cmd()
        .current_dir(tmp.path())
        .args(["render", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency tree error"));
}
