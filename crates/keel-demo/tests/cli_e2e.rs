//! End-to-end tests for the `keel` binary.
//!
//! These run the real executable and check what reaches stdout and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a Command for the keel binary with a clean environment.
#[allow(deprecated)]
fn keel_cmd() -> Command {
    let mut cmd = Command::cargo_bin("keel").unwrap();
    cmd.env_remove("KEEL_CONFIG")
        .env_remove("KEEL_KEYS")
        .env_remove("KEEL_ROWS")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

// =============================================================================
// Table
// =============================================================================

mod table {
    use super::*;

    #[test]
    fn test_local_paging() {
        keel_cmd()
            .args(["table", "--keys", "n"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Instances"))
            .stdout(predicate::str::contains("11-20 of 25"))
            .stdout(predicate::str::contains("events: none"));
    }

    #[test]
    fn test_remote_requests_are_printed() {
        keel_cmd()
            .args(["table", "--remote", "--rows", "56", "--keys", "n"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"fetch #1 {"pageIndex":0,"pageSize":10,"sortBy":[],"filterText":"","groupBy":[]"#,
            ))
            .stdout(predicate::str::contains(r#"fetch #2 {"pageIndex":1"#))
            .stdout(predicate::str::contains("11-20 of 56"));
    }

    #[test]
    fn test_frames_flag() {
        keel_cmd()
            .args(["table", "--frames", "--keys", "n,p"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--- frame 0 ---"))
            .stdout(predicate::str::contains("--- frame 2 ---"));
    }

    #[test]
    fn test_no_color_has_no_escapes() {
        keel_cmd()
            .args(["table"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

// =============================================================================
// Other widgets
// =============================================================================

mod widgets {
    use super::*;

    #[test]
    fn test_autosuggest_selection() {
        keel_cmd()
            .args(["autosuggest", "--keys", "e,f,s,enter"])
            .assert()
            .success()
            .stdout(predicate::str::contains("selected efs"));
    }

    #[test]
    fn test_dropdown_click() {
        keel_cmd()
            .args(["dropdown", "--keys", "enter,enter"])
            .assert()
            .success()
            .stdout(predicate::str::contains("item [0] Start"));
    }

    #[test]
    fn test_modal_close() {
        keel_cmd()
            .args(["modal", "--keys", "esc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("closed"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_file_is_used() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rows = 8\nkeys = [\"n\"]\n\n[table]\ntitle = \"Fleet\"\ndefault_page_size = 5").unwrap();
        keel_cmd()
            .args(["table", "--config"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Fleet"))
            .stdout(predicate::str::contains("6-8 of 8"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rows = 8").unwrap();
        keel_cmd()
            .args(["table", "--rows", "3", "--config"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1-3 of 3"));
    }

    #[test]
    fn test_invalid_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rows = [").unwrap();
        keel_cmd()
            .args(["table", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("parsing config file"));
    }

    #[test]
    fn test_bad_table_options_fail() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[table]\nsort_by = [{{ id = \"missing\" }}]").unwrap();
        keel_cmd()
            .args(["table", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing"));
    }

    #[test]
    fn test_unknown_widget() {
        keel_cmd()
            .arg("slider")
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }
}
