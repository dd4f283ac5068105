/// End-to-end tests for the CLI
///
/// Each test builds a throwaway conda prefix (a `conda-meta` directory of
/// JSON records plus a few installed files) and points `--prefix` at it, so
/// conda itself is never invoked.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn write_record(prefix: &Path, name: &str, version: &str, depends: &[&str], files: &[&str]) {
    let meta_dir = prefix.join("conda-meta");
    fs::create_dir_all(&meta_dir).unwrap();

    let record = serde_json::json!({
        "name": name,
        "version": version,
        "build": "h0_0",
        "channel": "https://conda.anaconda.org/conda-forge/linux-64",
        "depends": depends,
        "files": files,
    });
    fs::write(
        meta_dir.join(format!("{}-{}-h0_0.json", name, version)),
        serde_json::to_string_pretty(&record).unwrap(),
    )
    .unwrap();

    for file in files {
        let path = prefix.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
}

/// requests -> {python, urllib3}, urllib3 -> {python}, python -> {libzlib}
fn create_test_env() -> TempDir {
    let dir = TempDir::new().unwrap();
    let prefix = dir.path();

    write_record(
        prefix,
        "requests",
        "2.31.0",
        &["python >=3.7", "urllib3 >=1.21.1,<3"],
        &["lib/python3.12/site-packages/requests/__init__.py"],
    );
    write_record(
        prefix,
        "urllib3",
        "2.2.1",
        &["python >=3.7"],
        &["lib/python3.12/site-packages/urllib3/__init__.py"],
    );
    write_record(
        prefix,
        "python",
        "3.12.2",
        &["libzlib >=1.2.13,<2.0.0a0"],
        &["bin/python3.12"],
    );
    write_record(prefix, "libzlib", "1.2.13", &[], &["lib/libz.so.1"]);
    fs::write(prefix.join("conda-meta").join("history"), "==> 2024-03-01 <==\n").unwrap();

    dir
}

/// A command in the environment's own directory, with colors and
/// environment overrides switched off.
fn conda_tree(env: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("conda-tree");
    cmd.current_dir(env.path())
        .env_remove("RUST_LOG")
        .env_remove("CONDA_PREFIX")
        .args(["--no-color", "--prefix"])
        .arg(env.path());
    cmd
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        let env = create_test_env();
        conda_tree(&env).arg("leaves").assert().code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("conda-tree").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("conda-tree").arg("--version").assert().code(0);
    }

    /// Exit code 1: no subcommand prints usage
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("conda-tree")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Usage"));
    }

    /// Exit code 1: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("conda-tree")
            .arg("--invalid-option")
            .assert()
            .code(1);
    }

    /// Exit code 1: unknown package
    #[test]
    fn test_exit_code_unknown_package() {
        let env = create_test_env();
        conda_tree(&env)
            .args(["depends", "numpy"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("package \"numpy\" not found"));
    }

    /// Exit code 1: the prefix has no conda-meta directory
    #[test]
    fn test_exit_code_invalid_prefix() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("conda-tree")
            .args(["leaves", "--prefix"])
            .arg(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid environment prefix"));
    }
}

#[test]
fn test_e2e_leaves() {
    let env = create_test_env();
    conda_tree(&env)
        .arg("leaves")
        .assert()
        .success()
        .stdout("requests\n");
}

#[test]
fn test_e2e_leaves_export() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["leaves", "--export"])
        .assert()
        .success()
        .stdout("requests==2.31.0\n");
}

#[test]
fn test_e2e_depends_and_whoneeds() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["depends", "requests"])
        .assert()
        .success()
        .stdout("python\nurllib3\n");

    conda_tree(&env)
        .args(["whoneeds", "-r", "libzlib"])
        .assert()
        .success()
        .stdout("python\nrequests\nurllib3\n");
}

#[test]
fn test_e2e_deptree_with_hint() {
    let env = create_test_env();
    let expected = "\
requests==2.31.0
  ├─ python 3.12.2 [required: >=3.7]
  │  └─ libzlib 1.2.13 [required: >=1.2.13,<2.0.0a0]
  └─ urllib3 2.2.1 [required: >=1.21.1,<3]
     └─ python 3.12.2 [required: >=3.7]
       └─ dependencies of python displayed above
";

    conda_tree(&env)
        .arg("deptree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(expected))
        .stdout(predicate::str::contains("some redundancies have been hidden"));
}

#[test]
fn test_e2e_deptree_full_has_no_hint() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["deptree", "--full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("displayed above").not())
        .stdout(predicate::str::contains("redundancies").not());
}

#[test]
fn test_e2e_depends_dot() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["depends", "urllib3", "--dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {\n"))
        .stdout(predicate::str::contains("\"urllib3\" -> \"python\";"))
        .stdout(predicate::str::contains("\"python\" -> \"libzlib\";"))
        .stdout(predicate::str::contains("requests").not())
        .stdout(predicate::str::ends_with("}\n"));
}

#[test]
fn test_e2e_cycles_none() {
    let env = create_test_env();
    conda_tree(&env).arg("cycles").assert().success().stdout("");
}

#[test]
fn test_e2e_exclude_prunes_exclusive_dependencies() {
    let env = create_test_env();
    write_record(env.path(), "pytest", "8.0.2", &["iniconfig"], &[]);
    write_record(env.path(), "iniconfig", "2.0.0", &[], &[]);

    conda_tree(&env)
        .args(["leaves", "-e", "pytest", "-e", "jupyter*"])
        .assert()
        .success()
        .stdout("requests\n")
        .stderr(predicate::str::contains(
            "Exclude pattern 'jupyter*' did not match any package.",
        ));
}

#[test]
fn test_e2e_unowned_files() {
    let env = create_test_env();
    fs::write(env.path().join("bin").join("my-script"), "#!/bin/sh\n").unwrap();
    fs::create_dir_all(env.path().join("pkgs")).unwrap();
    fs::write(env.path().join("pkgs").join("urls.txt"), "").unwrap();

    conda_tree(&env)
        .arg("unowned-files")
        .assert()
        .success()
        .stdout("bin/my-script\n");
}

#[cfg(unix)]
#[test]
fn test_e2e_owned_file_with_backslash_is_not_unowned() {
    let env = create_test_env();
    write_record(env.path(), "fonts", "1.0", &[], &["share/fonts/a\\b.ttf"]);

    conda_tree(&env)
        .arg("unowned-files")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_e2e_who_owns() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["who-owns", "site-packages"])
        .assert()
        .success()
        .stdout(
            "requests==2.31.0 lib/python3.12/site-packages/requests/__init__.py\n\
             urllib3==2.2.1 lib/python3.12/site-packages/urllib3/__init__.py\n",
        );
}

#[test]
fn test_e2e_output_file() {
    let env = create_test_env();
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("tree.txt");

    conda_tree(&env)
        .args(["deptree", "--output"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("some redundancies have been hidden"));

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with("requests==2.31.0\n"));
    assert!(!written.contains('\u{1b}'));
}

#[test]
fn test_e2e_output_to_missing_directory_fails() {
    let env = create_test_env();
    conda_tree(&env)
        .args(["leaves", "--output", "/nonexistent/dir/leaves.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write to file"));
}
