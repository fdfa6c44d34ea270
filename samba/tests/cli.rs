use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

fn samba_cmd(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("samba");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn project(build: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("build.samba"), build).unwrap();
    temp
}

const HELLO: &str = "\
build:
\tprintfn(hi)
release: build
default(release)
";

#[test]
fn help_flag_works() {
    let temp = TempDir::new().unwrap();
    samba_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
    let temp = TempDir::new().unwrap();
    samba_cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn quiet_conflicts_with_verbose() {
    let temp = TempDir::new().unwrap();
    samba_cmd(&temp).args(["-q", "-v"]).assert().failure();
}

#[test]
fn default_target_runs() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("Build completed in"));
}

#[test]
fn explicit_target_runs() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .arg("build")
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn missing_target_fails() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .arg("nope")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("nope"))
        .stderr(predicate::str::contains("Build failed after"));
}

#[test]
fn missing_build_file_fails() {
    let temp = TempDir::new().unwrap();
    samba_cmd(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("build.samba"));
}

#[test]
fn duplicate_target_fails() {
    let temp = project("build:\nbuild:\n");
    samba_cmd(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("build"));
}

#[test]
fn alternate_build_file() {
    let temp = project("default:\n\tprintfn(wrong)\n");
    let other = temp.path().join("other.samba");
    std::fs::write(other, "default:\n\tprintfn(other)\n").unwrap();

    samba_cmd(&temp)
        .args(["-f", "other.samba"])
        .assert()
        .success()
        .stdout("other\n");
}

#[test]
fn list_marks_default() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .arg("--list")
        .assert()
        .success()
        .stdout("build\nrelease (default)\n");
}

#[test]
fn settings_file_picks_build_file() {
    let temp = project("default:\n\tprintfn(wrong)\n");
    let build_file = temp.path().join("project.samba");
    std::fs::write(build_file, "default:\n\tprintfn(right)\n").unwrap();
    let settings = temp.path().join("samba.yaml");
    std::fs::write(settings, "build_file: project.samba\n").unwrap();

    samba_cmd(&temp).assert().success().stdout("right\n");
}

#[test]
fn missing_explicit_settings_fails() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .args(["-c", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn invalid_settings_fail() {
    let temp = project(HELLO);
    std::fs::write(temp.path().join("samba.yaml"), "colour: true\n").unwrap();
    samba_cmd(&temp).assert().failure();
}

#[cfg(unix)]
#[test]
fn sync_command_runs() {
    let temp = project("default:\n\tsmb_execute_sync(touch, made)\n");
    samba_cmd(&temp).assert().success();
    assert!(temp.path().join("made").exists());
}

#[cfg(unix)]
#[test]
fn failing_sync_command_fails_build() {
    let temp = project("default:\n\tsmb_execute_sync(false)\n\tprintfn(after)\n");
    samba_cmd(&temp)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Build failed after"));
}

#[test]
fn dry_run_spawns_nothing() {
    let temp = project("default:\n\tsmb_execute_sync(touch, made)\n\tprintfn(done)\n");
    samba_cmd(&temp)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout("done\n")
        .stderr(predicate::str::contains("Would execute: touch made"))
        .stderr(predicate::str::contains("Build would have completed in"));
    assert!(!temp.path().join("made").exists());
}

#[test]
fn quiet_hides_summary() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .arg("-q")
        .assert()
        .success()
        .stdout("hi\n")
        .stderr("");
}

#[cfg(unix)]
#[test]
fn verbose_logs_commands() {
    let temp = project("default:\n\tsmb_execute_sync(true)\n");
    samba_cmd(&temp)
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing: true"));
}

#[cfg(unix)]
#[test]
fn verbose_from_settings_file() {
    let temp = project("default:\n\tsmb_execute_sync(true)\n");
    std::fs::write(temp.path().join("samba.yaml"), "verbose: true\n").unwrap();
    samba_cmd(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing: true"));
}

#[cfg(unix)]
#[test]
fn commands_are_not_logged_by_default() {
    let temp = project("default:\n\tsmb_execute_sync(true)\n");
    samba_cmd(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing: true").not());
}

#[test]
fn no_color_disables_ansi_styling() {
    let temp = project(HELLO);
    samba_cmd(&temp)
        .args(["--no-color", "-v"])
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("Build completed in"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn color_disabled_in_settings_file() {
    let temp = project(HELLO);
    std::fs::write(temp.path().join("samba.yaml"), "color: false\n").unwrap();
    samba_cmd(&temp)
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("Build completed in"))
        .stderr(predicate::str::contains("\x1b[").not());
}
