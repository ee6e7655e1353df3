//! CLI error handling tests for staffdesk.
//!
//! Invalid arguments, missing sessions and unreachable backends must give
//! stable exit codes and a readable message on stderr.

mod support;

use predicates::prelude::*;
use support::staffdesk;

// ============================================================================
// Usage errors
// ============================================================================

mod usage {
    use super::*;

    #[test]
    fn unknown_command_exits_with_args_error() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn unknown_format_fails() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args(["--format", "xml", "dashboard"])
            .assert()
            .code(10);
    }

    #[test]
    fn check_id_conflicts_with_all() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args(["server", "check", "1", "--all"])
            .assert()
            .code(10);
    }

    #[test]
    fn bad_skill_spec_is_rejected() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args(["employee", "register", "--name", "이영희", "--skill", "java"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("not a skill id"));
    }
}

// ============================================================================
// Session errors
// ============================================================================

mod session {
    use super::*;

    #[test]
    fn page_commands_require_login() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .arg("dashboard")
            .assert()
            .code(12)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("로그인이 필요합니다."));
    }

    #[test]
    fn json_errors_are_structured() {
        let home = tempfile::tempdir().unwrap();
        let output = staffdesk(home.path())
            .args(["--format", "json", "whoami"])
            .assert()
            .code(12)
            .get_output()
            .stderr
            .clone();
        let text = String::from_utf8(output).unwrap();
        let line = text.lines().last().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["error"]["code"], "ERR_SESSION");
    }

    #[test]
    fn corrupted_session_is_reported() {
        let home = tempfile::tempdir().unwrap();
        let data = home.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("session.json"), "{not json").unwrap();
        staffdesk(home.path())
            .arg("whoami")
            .assert()
            .code(12)
            .stderr(predicate::str::contains("staffdesk logout"));
    }

    #[test]
    fn logout_clears_a_corrupted_session() {
        let home = tempfile::tempdir().unwrap();
        let data = home.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("session.json"), "{not json").unwrap();
        staffdesk(home.path()).arg("logout").assert().success();
        assert!(!data.join("session.json").exists());
    }
}

// ============================================================================
// Config and network errors
// ============================================================================

mod environment {
    use super::*;

    #[test]
    fn non_http_api_url_is_a_config_error() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args(["--api-url", "ftp://example.com", "config", "show"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("설정을 불러올 수 없습니다."));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let home = tempfile::tempdir().unwrap();
        let missing = home.path().join("nope.json");
        staffdesk(home.path())
            .arg("--config")
            .arg(&missing)
            .args(["config", "show"])
            .assert()
            .code(11);
    }

    #[test]
    fn unreachable_backend_on_login() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args([
                "--api-url",
                "http://127.0.0.1:9",
                "--timeout",
                "2",
                "login",
                "-u",
                "admin",
                "--password",
                "pw",
            ])
            .assert()
            .code(14)
            .stderr(predicate::str::contains("서버 연결에 실패했습니다."));
        assert!(!home.path().join("data").join("session.json").exists());
    }

    #[test]
    fn config_show_reports_sources() {
        let home = tempfile::tempdir().unwrap();
        staffdesk(home.path())
            .args(["--api-url", "http://backend.test:8080", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| api_url | http://backend.test:8080 | CLI argument |"))
            .stdout(predicate::str::contains("| timeout_secs | 30 | builtin default |"));
    }
}
