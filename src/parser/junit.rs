//! Parses the bundled `TestRunner`'s JSON stdout into an [`ExecutionResult`].

use serde::Deserialize;

use crate::result::{ExecutionResult, ExecutionState, FailureDetail};

use super::TestOutputParser;

/// Shape written by `resources/TestRunner.java` — a subset of
/// [`ExecutionResult`], merged in by the caller rather than deserialized
/// into it directly so a schema drift in the harness fails loudly in a test
/// instead of silently picking up unrelated default fields.
#[derive(Debug, Deserialize)]
struct JunitPayload {
    state: JunitState,
    tests_run: u32,
    passed: u32,
    failed: u32,
    #[serde(default)]
    failure_details: Vec<FailureDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum JunitState {
    Passed,
    Failed,
}

/// Parser for the bundled JUnit `TestRunner`'s single-line JSON report.
pub struct JunitParser;

impl TestOutputParser for JunitParser {
    fn parse(&self, stdout: &str, stderr: &str) -> ExecutionResult {
        let Some(start) = stdout.find('{') else {
            return ExecutionResult::execution_error("TestRunner produced no JSON output");
        };
        let Some(end) = stdout.rfind('}') else {
            return ExecutionResult::execution_error("TestRunner produced no JSON output");
        };
        if end < start {
            return ExecutionResult::execution_error("TestRunner produced malformed JSON output");
        }

        match serde_json::from_str::<JunitPayload>(&stdout[start..=end]) {
            Ok(payload) => {
                let state = match payload.state {
                    JunitState::Passed => ExecutionState::Passed,
                    JunitState::Failed => ExecutionState::Failed,
                };
                ExecutionResult {
                    tests_run: payload.tests_run,
                    passed: payload.passed,
                    failed: payload.failed,
                    failure_details: payload.failure_details,
                    ..ExecutionResult::empty(state)
                }
            }
            Err(e) => {
                let mut result = ExecutionResult::execution_error(format!(
                    "failed to parse TestRunner output: {e}"
                ));
                result.runtime_error.push_str(&format!("\n{stderr}"));
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_passing_report() {
        let stdout = r#"{"state":"passed","tests_run":2,"passed":2,"failed":0,"failure_details":[]}"#;
        let parser = JunitParser;
        let result = parser.parse(stdout, "");
        assert_eq!(result.state, ExecutionState::Passed);
        assert_eq!(result.tests_run, 2);
    }

    #[test]
    fn parses_a_failing_report_with_details() {
        let stdout = r#"junk before {"state":"failed","tests_run":2,"passed":1,"failed":1,"failure_details":[{"test_case":"testAdd(AddTest)","expected":"5","received":"4","error_message":"expected:<5> but was:<4>","rawout":"..."}]} trailing junk"#;
        let parser = JunitParser;
        let result = parser.parse(stdout, "");
        assert_eq!(result.state, ExecutionState::Failed);
        assert_eq!(result.failure_details.len(), 1);
        assert_eq!(result.failure_details[0].expected, "5");
    }

    #[test]
    fn no_braces_is_execution_error_not_a_panic() {
        let parser = JunitParser;
        let result = parser.parse("no json here at all", "some stderr");
        assert_eq!(result.state, ExecutionState::ExecutionError);
    }

    #[test]
    fn malformed_json_is_execution_error_not_a_panic() {
        let parser = JunitParser;
        let result = parser.parse("{not valid json}", "");
        assert_eq!(result.state, ExecutionState::ExecutionError);
    }

    proptest::proptest! {
        #[test]
        fn never_panics_on_arbitrary_bytes(stdout in ".{0,500}", stderr in ".{0,200}") {
            let parser = JunitParser;
            let _ = parser.parse(&stdout, &stderr);
        }
    }
}
