// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `plugrack` binary.
//!
//! Every run gets an empty config file in a temp dir so local and user
//! configuration cannot leak in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plugrack.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_plugrack"))
            .current_dir(self.path())
            .arg("--config")
            .arg(self.path().join("plugrack.toml"))
            .args(args)
            .env_remove("RUST_LOG")
            .env("PLUGRACK_LOGGING_LEVEL", "warn")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---- list ----

#[test]
fn list_shows_builtin_plugins_in_discovery_order() {
    let ws = Workspace::new();
    let output = ws.run(&["list"]);
    assert!(output.status.success());

    let out = stdout(&output);
    let upper = out.find("plugins.case.Upper").unwrap();
    let double = out.find("plugins.repeat.Double").unwrap();
    let reverse = out.find("plugins.text.shape.Reverse").unwrap();
    let length = out.find("plugins.text.shape.Length").unwrap();
    assert!(upper < double && double < reverse && reverse < length);
    assert!(out.contains("uppercases"));
    assert!(out.contains("4 plugins found."));
    assert!(!out.contains("BasePlugin"));
}

#[test]
fn list_with_unknown_root_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["--root", "missing", "list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

// ---- apply ----

#[test]
fn apply_reports_one_line_per_plugin() {
    let ws = Workspace::new();
    let output = ws.run(&["apply", "hello"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains(r#"[OK]   plugins.case.Upper (uppercases): "hello" -> "HELLO""#));
    assert!(out.contains(r#"[OK]   plugins.repeat.Double (doubles): "hello" -> "hellohello""#));
    assert!(out.contains(r#"-> "olleh""#));
    assert!(out.contains("-> 5"));
}

#[test]
fn apply_exits_non_zero_when_a_plugin_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["apply", "21", "--json"]);
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.contains("[OK]   plugins.repeat.Double (doubles): 21 -> 42"));
    assert!(out.contains("[FAIL] plugins.case.Upper"));
    assert_eq!(out.lines().filter(|l| !l.is_empty()).count(), 4);
}

#[test]
fn apply_rejects_invalid_json() {
    let ws = Workspace::new();
    let output = ws.run(&["apply", "{nope", "--json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid JSON"));
}

// ---- manifest and config ----

#[test]
fn custom_manifest_replaces_builtins() {
    let ws = Workspace::new();
    let manifest = ws.write(
        "plugins.toml",
        r#"
[[namespace]]
name = "ext"
locations = ["ext"]

[[unit]]
name = "only"
location = "ext"
members = ["BasePlugin", "Reverse"]
"#,
    );

    let output = ws.run(&["--manifest", &manifest, "--root", "ext", "apply", "abc"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains(r#"[OK]   ext.only.Reverse (reverses): "abc" -> "cba""#));
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn manifest_with_unknown_member_fails_with_suggestion() {
    let ws = Workspace::new();
    let manifest = ws.write(
        "plugins.toml",
        r#"
[[namespace]]
name = "ext"
locations = ["ext"]

[[unit]]
name = "only"
location = "ext"
members = ["Revers"]
"#,
    );

    let output = ws.run(&["--manifest", &manifest, "--root", "ext", "list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("did you mean `Reverse`?"));
}

#[test]
fn config_typo_is_rendered_and_fails() {
    let ws = Workspace::new();
    ws.write("plugrack.toml", "[registry]\nroot_namspace = \"plugins\"\n");

    let output = ws.run(&["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("root_namspace"));
    assert!(stderr.contains("root_namespace"));
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();
    let output = Command::new(env!("CARGO_BIN_EXE_plugrack"))
        .current_dir(ws.path())
        .args(["--config", "nope.toml", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.toml does not exist"));
}

#[test]
fn config_root_namespace_is_honored() {
    let ws = Workspace::new();
    ws.write("plugrack.toml", "[registry]\nroot_namespace = \"plugins.text\"\n");

    let output = ws.run(&["list"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("2 plugins found."));
    assert!(!out.contains("plugins.case.Upper"));
}
