//! The canonical response schema returned for every `/execute` request.
//!
//! Every language/framework pipeline in [`crate::profile`] and [`crate::parser`]
//! ultimately produces an [`ExecutionResult`], regardless of which language ran
//! or whether a compile step even exists for it.

use serde::{Deserialize, Serialize};

/// Final disposition of an execution request.
///
/// Priority order when more than one condition could apply (earlier wins):
/// `execution_blocked` > `execution_error` > `compile_error` > `runtime_error`
/// > `failed` > `passed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    /// All tests passed, or non-test output matched exactly.
    Passed,
    /// At least one test failed, or non-test output did not match.
    Failed,
    /// A profile-declared compile step exited non-zero.
    CompileError,
    /// The plain program exited non-zero, failed to start, or timed out.
    RuntimeError,
    /// An infrastructure failure: filesystem, spawn, or unparseable harness output.
    ExecutionError,
    /// The requested language is administratively disabled.
    ExecutionBlocked,
}

/// One failed test case or output mismatch, with enough context to debug it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureDetail {
    pub test_case: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub received: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub rawout: String,
}

/// The canonical response body for `POST /execute`.
///
/// Invariants (see `SPEC_FULL.md` §3, enforced by the [`crate::executor::Executor`]
/// and exercised in its tests):
/// - `state == Passed` iff `failed == 0 && compilation_error.is_empty() && runtime_error.is_empty()`
/// - `state == CompileError` implies `tests_run == 0`
/// - `failure_details.len() == failed` whenever parsing completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub state: ExecutionState,
    pub tests_run: u32,
    pub passed: u32,
    pub failed: u32,
    #[serde(default)]
    pub failure_details: Vec<FailureDetail>,
    #[serde(default)]
    pub compilation_error: String,
    #[serde(default)]
    pub runtime_error: String,
    #[serde(default)]
    pub execution_time_exceeded: bool,
    #[serde(default)]
    pub memory_exceeded: bool,
}

impl ExecutionResult {
    /// A result with every field at its zero value and `state` as given.
    pub fn empty(state: ExecutionState) -> Self {
        Self {
            state,
            tests_run: 0,
            passed: 0,
            failed: 0,
            failure_details: Vec::new(),
            compilation_error: String::new(),
            runtime_error: String::new(),
            execution_time_exceeded: false,
            memory_exceeded: false,
        }
    }

    /// A `compile_error` result carrying the compiler's stderr.
    pub fn compile_error(stderr: impl Into<String>) -> Self {
        Self {
            compilation_error: stderr.into(),
            ..Self::empty(ExecutionState::CompileError)
        }
    }

    /// An `execution_error` result carrying a short infrastructure-failure message.
    pub fn execution_error(message: impl Into<String>) -> Self {
        Self {
            runtime_error: message.into(),
            ..Self::empty(ExecutionState::ExecutionError)
        }
    }

    /// HTTP status code matching this result's `state`.
    ///
    /// Every orderly outcome — including `compile_error` and `failed` — returns
    /// 200; the transport layer has no business treating a compile failure in
    /// the *user's* code as a 500.
    pub fn http_status(&self) -> u16 {
        200
    }
}
