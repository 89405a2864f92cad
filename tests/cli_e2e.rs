//! End-to-end CLI tests for chatlens.
//!
//! These tests run the actual binary with various arguments and check the
//! output.
//!
//! # Test Categories
//!
//! - **Analyze**: text and JSON reports, sender and date filters
//! - **Formats**: presets, auto-detection, custom patterns
//! - **Exports**: CSV and JSONL record export
//! - **Accounts**: sign-up, login and the login gate
//! - **Error handling**: proper error messages and exit codes
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with export fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let android = "\
12/03/23, 18:00 - Alice created group \"Weekend\"
12/03/23, 18:02 - Alice: Hello everyone!
12/03/23, 18:03 - Bob: Hi Alice! Pizza on Saturday?
13/03/23, 09:15 - Bob: <Media omitted>
02/04/23, 07:00 - Carol: pizza pizza https://example.com";
    fs::write(dir.path().join("android.txt"), android).unwrap();

    let ios = "\
[1/15/24, 10:30:00 AM] Alice: Hello everyone!
[1/15/24, 10:31:00 AM] Bob: Hi Alice!
[1/16/24, 1:32:00 PM] Alice: How is everyone doing?";
    fs::write(dir.path().join("ios.txt"), ios).unwrap();

    let broken = "\
01/01/23, 10:00 - Alice: fine
31/02/23, 10:00 - Bob: impossible date
02/01/23, 10:00 - Alice: fine again";
    fs::write(dir.path().join("broken.txt"), broken).unwrap();

    let custom = "\
2024-03-01 18:45 | Carol: custom layout
2024-03-02 08:00 | Dave: works";
    fs::write(dir.path().join("custom.txt"), custom).unwrap();

    fs::write(dir.path().join("empty.txt"), "").unwrap();

    dir
}

fn chatlens_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatlens"));
    Command::from_std(cmd)
}

fn path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn arg(p: &PathBuf) -> &str {
    p.to_str().unwrap()
}

// ============================================================================
// Analyze
// ============================================================================

mod analyze {
    use super::*;

    #[test]
    fn test_text_report() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Top Statistics"))
            .stdout(predicate::str::contains("Messages:  5"))
            .stdout(predicate::str::contains("Media:     1"))
            .stdout(predicate::str::contains("Links:     1"))
            .stdout(predicate::str::contains("Most Active Participants"))
            .stdout(predicate::str::contains("pizza"))
            .stdout(predicate::str::contains("March-2023"));
    }

    #[test]
    fn test_user_filter_hides_ranking() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--user", "Bob"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Analysis: Bob"))
            .stdout(predicate::str::contains("Messages:  2"))
            .stdout(predicate::str::contains("Most Active").not());
    }

    #[test]
    fn test_unknown_user_is_all_zero() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "-u", "Mallory"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  0"));
    }

    #[test]
    fn test_json_report_to_stdout() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        let output = chatlens_cmd()
            .args(["analyze", arg(&input), "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["stats"]["messages"], 5);
        assert_eq!(value["most_active"]["top"][0]["sender"], "Bob");
        assert_eq!(value["weekday_activity"].as_array().unwrap().len(), 7);
        assert_eq!(value["heatmap"]["cells"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_json_report_to_file() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");
        let output = path(&fixtures, "report.json");

        chatlens_cmd()
            .args(["analyze", arg(&input), "-f", "json", "-o", arg(&output)])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Report saved"));

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["filter"], "Overall");
    }

    #[test]
    fn test_date_window() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args([
                "analyze",
                arg(&input),
                "--after",
                "2023-03-13",
                "--before",
                "2023-03-31",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  1"))
            .stdout(predicate::str::contains("After:    2023-03-13"));
    }

    #[test]
    fn test_top_limits() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        let output = chatlens_cmd()
            .args([
                "analyze",
                arg(&input),
                "--format",
                "json",
                "--top-senders",
                "1",
                "--top-words",
                "1",
            ])
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["most_active"]["top"].as_array().unwrap().len(), 1);
        assert_eq!(value["common_words"][0]["word"], "pizza");
        assert_eq!(value["common_words"][0]["count"], 3);
    }

    #[test]
    fn test_empty_file() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "empty.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  0"))
            .stdout(predicate::str::contains("Peak Slot").not());
    }

    #[test]
    fn test_config_file() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "ios.txt");
        let config = path(&fixtures, "chatlens.toml");
        fs::write(&config, "[parser]\npreset = \"us-bracketed\"\n").unwrap();

        chatlens_cmd()
            .args(["analyze", arg(&input), "--config", arg(&config)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  3"));
    }
}

// ============================================================================
// Formats
// ============================================================================

mod formats {
    use super::*;

    #[test]
    fn test_auto_detect() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "ios.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--preset", "auto"])
            .assert()
            .success()
            .stdout(predicate::str::contains("us-bracketed (detected)"))
            .stdout(predicate::str::contains("Messages:  3"));
    }

    #[test]
    fn test_explicit_preset_alias() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "ios.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--preset", "ios"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  3"));
    }

    #[test]
    fn test_custom_pattern() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "custom.txt");

        chatlens_cmd()
            .args([
                "analyze",
                arg(&input),
                "--pattern",
                r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \| ",
                "--date-format",
                "%Y-%m-%d %H:%M",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  2"))
            .stdout(predicate::str::contains("Carol"));
    }

    #[test]
    fn test_pattern_requires_date_format() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "custom.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--pattern", "^x"])
            .assert()
            .failure();
    }

    #[test]
    fn test_invalid_timestamps_skipped_by_default() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "broken.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped:  1"))
            .stdout(predicate::str::contains("Messages:  2"));
    }

    #[test]
    fn test_strict_fails_on_invalid_timestamp() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "broken.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--strict"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Malformed timestamp"))
            .stderr(predicate::str::contains("line 2"));
    }
}

// ============================================================================
// Exports
// ============================================================================

mod exports {
    use super::*;

    #[test]
    fn test_export_jsonl() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");
        let export = path(&fixtures, "records.jsonl");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--export-records", arg(&export)])
            .assert()
            .success()
            .stderr(predicate::str::contains("Exported 5 records"));

        let content = fs::read_to_string(&export).unwrap();
        assert_eq!(content.lines().count(), 5);
        assert!(content.lines().next().unwrap().contains(r#""system":true"#));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_export_csv() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");
        let export = path(&fixtures, "records.csv");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--export-records", arg(&export)])
            .assert()
            .success();

        let content = fs::read_to_string(&export).unwrap();
        assert!(content.starts_with("Timestamp;Sender;Body;Media"));
        assert!(content.contains("2023-03-13 09:15;Bob;<Media omitted>;1"));
    }

    #[test]
    fn test_export_unknown_extension() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");
        let export = path(&fixtures, "records.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--export-records", arg(&export)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("record export"));
    }
}

// ============================================================================
// Senders
// ============================================================================

mod senders {
    use super::*;

    #[test]
    fn test_senders_list() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["senders", arg(&input)])
            .assert()
            .success()
            .stdout("Overall\nAlice\nBob\nCarol\ngroup_notification\n");
    }

    #[test]
    fn test_senders_empty_file() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "empty.txt");

        chatlens_cmd()
            .args(["senders", arg(&input)])
            .assert()
            .success()
            .stdout("Overall\n");
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[cfg(feature = "accounts")]
mod accounts {
    use super::*;

    fn gated_config(dir: &TempDir) -> PathBuf {
        let config = path(dir, "chatlens.toml");
        fs::write(
            &config,
            "[accounts]\nstore_path = \"users.json\"\nrequire_login = true\n",
        )
        .unwrap();
        config
    }

    #[test]
    fn test_signup_then_login() {
        let fixtures = setup_fixtures();
        let store = path(&fixtures, "users.json");

        chatlens_cmd()
            .args(["account", "signup", "alice", "--password", "pw", "--store", arg(&store)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Account 'alice' created"));

        chatlens_cmd()
            .args(["account", "login", "alice", "--password", "pw", "--store", arg(&store)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in as 'alice'"));

        chatlens_cmd()
            .args(["account", "login", "alice", "--password", "bad", "--store", arg(&store)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid credentials"));
    }

    #[test]
    fn test_duplicate_signup_fails() {
        let fixtures = setup_fixtures();
        let store = path(&fixtures, "users.json");

        for expect_ok in [true, false] {
            let assert = chatlens_cmd()
                .args(["account", "signup", "bob", "--password", "pw", "--store", arg(&store)])
                .assert();
            if expect_ok {
                assert.success();
            } else {
                assert
                    .failure()
                    .stderr(predicate::str::contains("already exists"));
            }
        }
    }

    #[test]
    fn test_login_gate() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");
        let config = gated_config(&fixtures);

        chatlens_cmd()
            .args(["account", "signup", "alice", "--password", "pw", "--config", arg(&config)])
            .assert()
            .success();

        chatlens_cmd()
            .args(["analyze", arg(&input), "--config", arg(&config)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid credentials"));

        chatlens_cmd()
            .args([
                "analyze",
                arg(&input),
                "--config",
                arg(&config),
                "--login",
                "alice",
                "--password",
                "pw",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Messages:  5"));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_input() {
        chatlens_cmd()
            .args(["analyze", "/definitely/not/here.txt"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_invalid_date() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--after", "13/03/2023"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_unknown_preset() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "android.txt");

        chatlens_cmd()
            .args(["analyze", arg(&input), "--preset", "telegram"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown preset"));
    }

    #[test]
    fn test_invalid_utf8() {
        let fixtures = setup_fixtures();
        let input = path(&fixtures, "binary.txt");
        fs::write(&input, [0x30u8, 0xff, 0xfe, 0x00]).unwrap();

        chatlens_cmd()
            .args(["analyze", arg(&input)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("UTF-8"));
    }

    #[test]
    fn test_help() {
        chatlens_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("analyze"))
            .stdout(predicate::str::contains("senders"));
    }
}
