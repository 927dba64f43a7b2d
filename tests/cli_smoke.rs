use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn todo_help_works() {
    Command::cargo_bin("todo")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("remove"));
}

#[test]
fn todo_version_works() {
    Command::cargo_bin("todo")
        .expect("binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["init", "add", "list", "complete", "remove"];

    for cmd in subcommands {
        Command::cargo_bin("todo")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    Command::cargo_bin("todo")
        .expect("binary")
        .assert()
        .failure()
        .code(2);
}
