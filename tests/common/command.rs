use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

const GIT_IDENTITY: [(&str, &str); 5] = [
    ("GIT_AUTHOR_NAME", "fake_user"),
    ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
    ("GIT_COMMITTER_NAME", "fake_user"),
    ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
    ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
];

const GIT_ISOLATION: [(&str, &str); 2] = [
    ("GIT_CONFIG_NOSYSTEM", "1"),
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
];

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_git_command(repository_dir.path(), &["init", "--quiet"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one\n".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two\n".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three\n".to_string(),
    );
    write_file(file3);

    run_git_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    run_git_command(repository_dir.path(), &["commit", "--quiet", "-m", "Initial commit"])
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn numbered_lines() -> String {
    (1..=12).map(|n| format!("line {n}\n")).collect()
}

pub fn run_gw_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gw").expect("Failed to find gw binary");
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("GW_STATE_DIR");
    cmd.env_remove("GW_CONTEXT");
    cmd.env_remove("GW_LOG");
    cmd.envs(GIT_IDENTITY).envs(GIT_ISOLATION);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.envs(GIT_IDENTITY).envs(GIT_ISOLATION);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args).assert().success();
    String::from_utf8_lossy(&output.get_output().stdout).trim().to_string()
}

pub fn head_subject(dir: &Path) -> String {
    git_output(dir, &["log", "-1", "--format=%s"])
}
