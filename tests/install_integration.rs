//! Install pipeline tests using the REAL pyex binary

mod common;

use std::fs;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
#[cfg(unix)]
fn test_install_python_script_adds_directive_and_execute_bit() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("script.py", "print('hello')\n");
    common::set_mode(&script, 0o644);

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"));

    let installed = workspace.read_installed("script");
    assert_eq!(installed, "#!/bin/python3\n\nprint('hello')\n");
    assert_ne!(common::mode_of(&workspace.bin.join("script")) & 0o100, 0);

    assert_eq!(fs::read_to_string(&script).unwrap(), "print('hello')\n");
    assert_eq!(common::mode_of(&script), 0o644);
    assert!(workspace.staged_leftovers().is_empty());
}

#[test]
#[cfg(unix)]
fn test_install_ready_shell_script_is_copied_unchanged() {
    let workspace = TestWorkspace::new();
    let content = "#!/bin/bash\necho hi\n";
    let script = workspace.write_script("tool.sh", content);
    common::set_mode(&script, 0o755);

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("already executable"))
        .stdout(predicate::str::contains("already present"));

    assert_eq!(workspace.read_installed("tool"), content);
    assert!(workspace.staged_leftovers().is_empty());
}

#[test]
fn test_install_unsupported_suffix_fails_without_side_effects() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("notes.txt", "just text\n");

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'.txt' is an invalid suffix"))
        .stderr(predicate::str::contains(".py, .sh"));

    assert!(!workspace.bin.exists());
    assert_eq!(fs::read_to_string(&script).unwrap(), "just text\n");
    assert!(workspace.staged_leftovers().is_empty());
}

#[test]
fn test_install_file_without_suffix_is_rejected() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("runme", "echo hi\n");

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid suffix"));

    assert!(!workspace.bin.exists());
}

#[test]
fn test_install_with_custom_name() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("tool.sh", "echo hi\n");

    workspace
        .pyex()
        .arg(&script)
        .args(["--all", "--customname", "mytool"])
        .assert()
        .success();

    assert!(workspace.installed("mytool"));
    assert!(!workspace.installed("tool"));
    assert_eq!(workspace.read_installed("mytool"), "#!/bin/bash\n\necho hi\n");
}

#[test]
fn test_install_rejects_custom_name_with_path() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("tool.sh", "echo hi\n");

    workspace
        .pyex()
        .arg(&script)
        .args(["--all", "-c", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid custom name"));

    assert!(!workspace.temp.path().join("escape").exists());
    assert!(workspace.staged_leftovers().is_empty());
}

#[test]
fn test_missing_file_fails() {
    let workspace = TestWorkspace::new();

    workspace
        .pyex()
        .arg(workspace.src.join("absent.py"))
        .arg("--all")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!workspace.bin.exists());
}

#[test]
fn test_reinstall_overwrites_previous_command() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("script.py", "print(1)\n");
    workspace.pyex().arg(&script).arg("--all").assert().success();

    fs::write(&script, "print(2)\n").unwrap();
    workspace.pyex().arg(&script).arg("--all").assert().success();

    assert_eq!(
        workspace.read_installed("script"),
        "#!/bin/python3\n\nprint(2)\n"
    );
}

#[test]
fn test_keepsuffix_warns_and_still_strips() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("script.py", "print(1)\n");

    workspace
        .pyex()
        .arg(&script)
        .args(["--all", "--keepsuffix"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--keepsuffix is not supported yet"));

    assert!(workspace.installed("script"));
    assert!(!workspace.installed("script.py"));
}

#[test]
fn test_install_dir_from_environment() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("script.py", "print(1)\n");
    let env_bin = workspace.temp.path().join("env-bin");

    common::pyex_cmd()
        .env("PYEX_INSTALL_DIR", &env_bin)
        .env("PYEX_CONFIG", &workspace.config)
        .arg(&script)
        .arg("--all")
        .assert()
        .success();

    assert!(env_bin.join("script").exists());
}

#[test]
#[cfg(unix)]
fn test_config_file_adds_kind_and_exec_scope() {
    let workspace = TestWorkspace::new();
    workspace.write_config("exec_scope: all\nkinds:\n  .rb: \"#!/usr/bin/ruby\"\n");
    let script = workspace.write_script("hello.rb", "puts 'hi'\n");
    common::set_mode(&script, 0o644);

    workspace.pyex().arg(&script).arg("--all").assert().success();

    assert_eq!(
        workspace.read_installed("hello"),
        "#!/usr/bin/ruby\n\nputs 'hi'\n"
    );
    assert_eq!(common::mode_of(&workspace.bin.join("hello")) & 0o111, 0o111);
}

#[test]
fn test_malformed_config_file_fails() {
    let workspace = TestWorkspace::new();
    workspace.write_config("kinds: [unclosed");
    let script = workspace.write_script("script.py", "print(1)\n");

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));

    assert!(!workspace.bin.exists());
}

#[test]
fn test_install_never_replaces_hidden_user_file() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("tool.sh", "echo hi\n");
    let user_file = workspace.write_script(".tool", "precious user data");

    workspace
        .pyex()
        .arg(&script)
        .arg("--all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to rename"));

    assert_eq!(fs::read_to_string(&user_file).unwrap(), "precious user data");
    assert!(!workspace.installed("tool"));
    assert_eq!(workspace.staged_leftovers(), vec![".tool".to_string()]);
}

#[test]
fn test_install_into_source_dir_under_staged_name_fails() {
    let workspace = TestWorkspace::new();
    let script = workspace.write_script("tool.sh", "echo hi\n");

    common::pyex_cmd()
        .env_remove("PYEX_INSTALL_DIR")
        .env("PYEX_CONFIG", &workspace.config)
        .arg(&script)
        .args(["--all", "-c", ".tool", "--install-dir"])
        .arg(&workspace.src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is the source file itself"));

    assert!(workspace.staged_leftovers().is_empty());
}

#[test]
fn test_install_script_with_latin1_bytes() {
    let workspace = TestWorkspace::new();
    let script = workspace.src.join("cafe.sh");
    fs::write(&script, b"echo caf\xe9\n").unwrap();

    workspace.pyex().arg(&script).arg("--all").assert().success();

    assert_eq!(
        fs::read(workspace.bin.join("cafe")).unwrap(),
        b"#!/bin/bash\n\necho caf\xe9\n"
    );
}
