use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn mdcombine(vault: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mdcombine"));
    cmd.arg("--vault")
        .arg(vault)
        .arg("--config")
        .arg(vault.join(".settings.toml"));
    cmd
}

/// Files in `dir` whose name starts with `prefix`.
fn outputs(dir: &Path, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with(prefix))
        .collect();
    names.sort();
    names
}

#[test]
fn folder_command_combines_in_alphabetical_order() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("Notes/b.md"), "two");
    write_file(&temp.path().join("Notes/a.md"), "one");

    mdcombine(temp.path())
        .arg("--suffix")
        .arg("random")
        .arg("folder")
        .arg(temp.path().join("Notes"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Combined 2 files into notes_"));

    let names = outputs(&temp.path().join("Notes"), "notes_");
    assert_eq!(names.len(), 1);
    let content = fs::read_to_string(temp.path().join("Notes").join(&names[0])).unwrap();
    let a = content.find("# a.md").unwrap();
    let b = content.find("# b.md").unwrap();
    assert!(a < b);
    assert!(content.contains("one") && content.contains("two"));
}

#[test]
fn empty_folder_without_context_reports_and_writes_nothing() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("Empty")).unwrap();

    mdcombine(temp.path())
        .arg("--no-context")
        .arg("folder")
        .arg(temp.path().join("Empty"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No markdown files found"));

    assert_eq!(fs::read_dir(temp.path().join("Empty")).unwrap().count(), 0);
}

#[test]
fn empty_folder_with_context_writes_tree_only() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("Empty/sub")).unwrap();

    mdcombine(temp.path())
        .arg("--context")
        .arg("--timestamp-format")
        .arg("%Y")
        .arg("folder")
        .arg(temp.path().join("Empty"))
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote directory context"));

    let names = outputs(&temp.path().join("Empty"), "empty_");
    assert_eq!(names.len(), 1);
    let content = fs::read_to_string(temp.path().join("Empty").join(&names[0])).unwrap();
    assert!(content.contains("Empty/\n└── sub/"));
}

#[test]
fn vault_command_writes_at_root() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("Notes/a.md"), "one");
    write_file(&temp.path().join("top.md"), "top");

    mdcombine(temp.path())
        .arg("vault")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Combined 2 files into vault_combined_"));

    assert_eq!(outputs(temp.path(), "vault_combined_").len(), 1);
}

#[test]
fn unreadable_document_fails_with_message() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("Notes/a.md"), "one");
    fs::write(temp.path().join("Notes/b.md"), [0xff, 0xfe]).unwrap();

    mdcombine(temp.path())
        .arg("folder")
        .arg(temp.path().join("Notes"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read Notes/b.md"));

    assert!(outputs(&temp.path().join("Notes"), "notes_").is_empty());
}

#[test]
fn folder_outside_vault_is_rejected() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("vault")).unwrap();
    fs::create_dir_all(temp.path().join("other")).unwrap();

    mdcombine(&temp.path().join("vault"))
        .arg("folder")
        .arg(temp.path().join("other"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not inside the vault"));
}

#[test]
fn save_persists_overrides() {
    let temp = tempdir().unwrap();

    mdcombine(temp.path())
        .arg("--random-length")
        .arg("100")
        .arg("--suffix")
        .arg("random")
        .arg("--save")
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("random_length = 32"));

    mdcombine(temp.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("filename_suffix = \"random\""))
        .stdout(predicate::str::contains("random_length = 32"));
}
