//! Parses CxxTest `--error-printer` stdout into an [`ExecutionResult`].

use regex::Regex;
use std::sync::LazyLock;

use crate::result::{ExecutionResult, ExecutionState, FailureDetail};

use super::TestOutputParser;

static RUNNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Running cxxtest tests \((\d+) tests?\)").unwrap());
static FAILED_SKIPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Failed (\d+) and Skipped \d+ of (\d+) tests").unwrap());
static ERROR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Error:\s*Expected\s*\((?P<lhs>[^\n]+?)\),\s*found\s*\((?P<rhs>[^\n]+?)\)").unwrap()
});
static EQUALITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*==\s*(.*)$").unwrap());
static INEQUALITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*!=\s*(.*)$").unwrap());

/// Parser for `cxxtestgen --error-printer` generated runner stdout.
pub struct CxxTestParser;

impl TestOutputParser for CxxTestParser {
    fn parse(&self, stdout: &str, stderr: &str) -> ExecutionResult {
        let mut tests_run: u32 = RUNNING
            .captures(stdout)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        let mut failed = 0u32;

        if let Some(caps) = FAILED_SKIPPED.captures(stdout) {
            failed = caps[1].parse().unwrap_or(0);
            tests_run = caps[2].parse().unwrap_or(tests_run);
        }

        let passed = tests_run.saturating_sub(failed);
        let rawout = format!("{stdout}\n{stderr}");

        let failure_details: Vec<FailureDetail> = ERROR_LINE
            .captures_iter(stdout)
            .map(|caps| {
                let lhs = caps.name("lhs").map(|m| m.as_str()).unwrap_or("");
                let rhs = caps.name("rhs").map(|m| m.as_str()).unwrap_or("");

                let expected = match EQUALITY.captures(lhs) {
                    Some(eq) => eq[2].to_string(),
                    None => lhs.to_string(),
                };
                let received = match INEQUALITY.captures(rhs) {
                    Some(ineq) => ineq[1].to_string(),
                    None => rhs.to_string(),
                };

                FailureDetail {
                    test_case: String::new(),
                    expected,
                    received,
                    error_message: "AssertionError: Output did not match expected result"
                        .to_string(),
                    rawout: rawout.clone(),
                }
            })
            .collect();

        let state = if failed == 0 {
            ExecutionState::Passed
        } else {
            ExecutionState::Failed
        };

        ExecutionResult {
            tests_run,
            passed,
            failed,
            failure_details,
            ..ExecutionResult::empty(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tests_passed() {
        let parser = CxxTestParser;
        let result = parser.parse("Running cxxtest tests (3 tests)\nOK!", "");
        assert_eq!(result.state, ExecutionState::Passed);
        assert_eq!(result.tests_run, 3);
        assert_eq!(result.passed, 3);
        assert_eq!(result.failed, 0);
    }

    #[test]
    fn parses_failure_summary_and_error_line() {
        let stdout = r#"Running cxxtest tests (2 tests)
In AddTest::testAdd:
Error: Expected (add(2, 2) == 5), found (4 != 5)

Failed 1 and Skipped 0 of 2 tests
"#;
        let parser = CxxTestParser;
        let result = parser.parse(stdout, "");
        assert_eq!(result.tests_run, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.passed, 1);
        assert_eq!(result.failure_details.len(), 1);
        assert_eq!(result.failure_details[0].expected, "5");
        assert_eq!(result.failure_details[0].received, "4");
    }

    #[test]
    fn garbage_input_never_panics() {
        let parser = CxxTestParser;
        let result = parser.parse("\0garbage\0not cxxtest", "\0\0");
        assert_eq!(result.tests_run, 0);
        assert!(result.failure_details.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn never_panics_on_arbitrary_bytes(stdout in ".{0,500}", stderr in ".{0,200}") {
            let parser = CxxTestParser;
            let _ = parser.parse(&stdout, &stderr);
        }
    }
}
