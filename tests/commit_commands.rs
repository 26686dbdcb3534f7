use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::PENDING_DOCUMENT;
use common::command::{
    git_output, head_subject, init_repository_dir, run_git_command, run_gw_command,
};
use common::file::{FileSpec, write_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn stage_change(dir: &TempDir) {
    write_file(FileSpec::new(dir.path().join("1.txt"), "uno\n".to_string()));
    run_git_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();
}

#[rstest]
fn commit_with_message_argument_skips_confirmation(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);

    run_gw_command(dir.path(), &["commit", "feat: update one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Are you sure").not())
        .stdout(predicate::str::contains("Changes committed successfully!"));

    assert_eq!(head_subject(dir.path()), "feat: update one");
    dir.child(PENDING_DOCUMENT).assert(predicate::path::missing());
}

#[rstest]
fn commit_uses_confirmed_draft(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);
    run_gw_command(dir.path(), &["message", "docs: describe numbers"])
        .assert()
        .success();

    run_gw_command(dir.path(), &["commit"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commit message:\ndocs: describe numbers\n"))
        .stdout(predicate::str::contains("Are you sure you want to commit these changes? [Y/n]"));

    assert_eq!(head_subject(dir.path()), "docs: describe numbers");
    dir.child(PENDING_DOCUMENT).assert(predicate::path::missing());
}

#[rstest]
fn empty_answer_accepts_the_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);
    run_gw_command(dir.path(), &["prepare", "chore: tidy"])
        .assert()
        .success();

    run_gw_command(dir.path(), &["commit"])
        .write_stdin("\n")
        .assert()
        .success();

    assert_eq!(head_subject(dir.path()), "chore: tidy");
}

#[rstest]
fn declined_commit_keeps_document_and_history(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);
    run_gw_command(dir.path(), &["prepare", "feat: not yet"])
        .assert()
        .success();

    run_gw_command(dir.path(), &["commit"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Commit aborted by user."));

    assert_eq!(head_subject(dir.path()), "Initial commit");
    dir.child(PENDING_DOCUMENT).assert(predicate::path::is_file());
}

#[rstest]
fn template_draft_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);

    run_gw_command(dir.path(), &["commit", "--yes"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Commit message is not valid"))
        .stdout(predicate::str::contains("Allowed types:"))
        .stderr(predicate::str::contains("commit type `type` is not allowed"));

    assert_eq!(head_subject(dir.path()), "Initial commit");
    dir.child(PENDING_DOCUMENT).assert(predicate::path::is_file());
}

#[rstest]
#[case("")]
#[case("weird format no colon")]
#[case("feat: ")]
fn invalid_message_argument_is_rejected(init_repository_dir: TempDir, #[case] message: &str) {
    let dir = init_repository_dir;
    stage_change(&dir);

    run_gw_command(dir.path(), &["commit", message])
        .assert()
        .failure();

    assert_eq!(head_subject(dir.path()), "Initial commit");
}

#[rstest]
fn amend_rewrites_the_last_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    stage_change(&dir);

    run_gw_command(dir.path(), &["commit", "--amend", "fix: amended initial commit"])
        .assert()
        .success();

    assert_eq!(head_subject(dir.path()), "fix: amended initial commit");
    assert_eq!(git_output(dir.path(), &["rev-list", "--count", "HEAD"]), "1");
}

#[rstest]
fn backend_failure_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_gw_command(dir.path(), &["commit", "feat: nothing staged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`git commit -m feat: nothing staged` failed"));

    dir.child(PENDING_DOCUMENT).assert(predicate::path::is_file());
}
