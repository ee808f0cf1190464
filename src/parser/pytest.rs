//! Parses `pytest` stdout into an [`ExecutionResult`].

use regex::Regex;
use std::sync::LazyLock;

use crate::result::{ExecutionResult, ExecutionState, FailureDetail};

use super::TestOutputParser;

static SUMMARY_BOTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) passed, (\d+) failed").unwrap());
static SUMMARY_PASSED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+) passed").unwrap());
static SUMMARY_FAILED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+) failed").unwrap());
static FAILURES_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"={10,}\s*FAILURES\s*={10,}").unwrap());
static SECTION_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"={10,}").unwrap());
static FAILURE_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"_{5,}\s*(?P<test_case>\S+)\s*_{5,}[\s\S]*?>\s*assert\s+(?P<assertion>[^\n]+)\nE\s+assert\s+(?P<failed_expr>[^\n]+)(?:\nE\s+\+\s+where\s+(?P<evaluated>[^\n]+)\s*=)?",
    )
    .unwrap()
});
static EQUALITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*==\s*(.*)$").unwrap());

/// Parser for `pytest`'s default (non-JUnit-XML) console output.
pub struct PytestParser;

impl TestOutputParser for PytestParser {
    fn parse(&self, stdout: &str, stderr: &str) -> ExecutionResult {
        let (passed, failed) = parse_summary(stdout);
        let failure_details = parse_failures(stdout, stderr);

        let state = if failed == 0 {
            ExecutionState::Passed
        } else {
            ExecutionState::Failed
        };

        ExecutionResult {
            tests_run: passed + failed,
            passed,
            failed,
            failure_details,
            ..ExecutionResult::empty(state)
        }
    }
}

fn parse_summary(stdout: &str) -> (u32, u32) {
    if let Some(caps) = SUMMARY_BOTH.captures(stdout) {
        let passed = caps[1].parse().unwrap_or(0);
        let failed = caps[2].parse().unwrap_or(0);
        return (passed, failed);
    }
    let passed = SUMMARY_PASSED
        .captures(stdout)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);
    let failed = SUMMARY_FAILED
        .captures(stdout)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);
    (passed, failed)
}

fn parse_failures(stdout: &str, stderr: &str) -> Vec<FailureDetail> {
    let rawout = format!("{stdout}\n{stderr}");

    let Some(header_match) = FAILURES_HEADER.find(stdout) else {
        return Vec::new();
    };
    let after_header = &stdout[header_match.end()..];
    let block = match SECTION_BREAK.find(after_header) {
        Some(m) => &after_header[..m.start()],
        None => after_header,
    };

    FAILURE_CASE
        .captures_iter(block)
        .map(|caps| {
            let test_case = caps.name("test_case").map(|m| m.as_str()).unwrap_or("");
            let assertion = caps.name("assertion").map(|m| m.as_str()).unwrap_or("");
            let failed_expr = caps.name("failed_expr").map(|m| m.as_str()).unwrap_or("");
            let evaluated = caps.name("evaluated").map(|m| m.as_str().trim());

            let (expected, lhs) = match EQUALITY.captures(failed_expr) {
                Some(eq) => (eq[2].trim().to_string(), eq[1].trim().to_string()),
                None => (String::new(), failed_expr.trim().to_string()),
            };
            let received = evaluated.map(|e| e.to_string()).unwrap_or(lhs);

            FailureDetail {
                test_case: test_case.to_string(),
                expected,
                received,
                error_message: format!("Assertion failed: {assertion}"),
                rawout: rawout.clone(),
            }
        })
        .collect()
}
