//! Top-level orchestration: workspace → compile → run → parse → report.
//!
//! `Executor::execute` is the single entry point the HTTP handler calls. It
//! never lets an [`ExecutorError`] escape — every infra failure is caught
//! here and converted to an `execution_error` [`ExecutionResult`] instead,
//! matching the teacher's pattern of keeping typed errors internal to one
//! coordinating layer (`Orchestrator::run_with_tests` in the teacher plays
//! the same role for sandboxed test runs).

use std::time::Duration;

use crate::config::Config;
use crate::process::ProcessDriver;
use crate::profile::{BuildOutcome, LanguageProfile, cpp::CppProfile, java::JavaProfile, python::PythonProfile};
use crate::request::{ExecuteRequest, Language};
use crate::result::{ExecutionResult, ExecutionState, FailureDetail};
use crate::workspace::Workspace;

/// Resolves a [`Language`] to its [`LanguageProfile`] and drives one request
/// through workspace creation, build, run, and parse.
pub struct Executor {
    config: Config,
    driver: ProcessDriver,
}

impl Executor {
    pub fn new(config: Config) -> Self {
        let driver = ProcessDriver::new(Duration::from_millis(config.process.timeout_ms));
        Self { config, driver }
    }

    fn profile_for(&self, language: Language) -> Box<dyn LanguageProfile> {
        match language {
            Language::Cpp => Box::new(CppProfile::new(
                self.config.languages.cpp.compiler.clone(),
                self.config.languages.cpp.cxxtestgen.clone(),
                self.config.languages.cpp.cxxtest_include_dir.clone(),
            )),
            Language::Java => Box::new(JavaProfile::new(
                self.config.languages.java.javac.clone(),
                self.config.languages.java.java.clone(),
                self.config.languages.java.classpath_jars.clone(),
            )),
            Language::Python => Box::new(PythonProfile::new(self.config.languages.python.python.clone())),
        }
    }

    /// Runs one request end to end. Always returns a complete
    /// [`ExecutionResult`] — infra failures are reported as
    /// `execution_error`, never propagated as an `Err`.
    pub async fn execute(&self, request: &ExecuteRequest) -> ExecutionResult {
        match self.try_execute(request).await {
            Ok(result) => result,
            Err(e) => ExecutionResult::execution_error(e.to_string()),
        }
    }

    async fn try_execute(
        &self,
        request: &ExecuteRequest,
    ) -> Result<ExecutionResult, crate::error::ExecutorError> {
        let profile = self.profile_for(request.language);
        let workspace = Workspace::create(&self.config.process.temp_root).await?;

        let build = if request.run_tests {
            profile
                .build_harness(&self.driver, &workspace, &request.code, &request.test_code)
                .await?
        } else {
            profile
                .build_plain(&self.driver, &workspace, &request.code)
                .await?
        };

        let target = match build {
            BuildOutcome::CompileError(stderr) => {
                return Ok(ExecutionResult::compile_error(stderr));
            }
            BuildOutcome::Ready(target) => target,
        };

        let outcome = self
            .driver
            .run(
                &target.program,
                &target.args,
                workspace.path(),
                &request.stdin,
                Some(Duration::from_millis(self.config.process.timeout_ms)),
            )
            .await?;

        if outcome.timed_out {
            let timeout_state = match request.language {
                Language::Python => ExecutionState::Failed,
                Language::Cpp | Language::Java => ExecutionState::RuntimeError,
            };
            let mut result = ExecutionResult::empty(timeout_state);
            result.execution_time_exceeded = true;
            result.runtime_error = "execution exceeded the time limit".to_string();
            return Ok(result);
        }

        if request.run_tests {
            let mut result = profile.parser().parse(&outcome.stdout, &outcome.stderr);
            result.execution_time_exceeded = false;
            return Ok(result);
        }

        Ok(self.compare_plain_output(request, &outcome))
    }

    /// Non-test mode: one "test", comparing trimmed stdout against the
    /// trimmed expected output (Open Question (a), see `DESIGN.md`).
    fn compare_plain_output(
        &self,
        request: &ExecuteRequest,
        outcome: &crate::process::ExecutionOutcome,
    ) -> ExecutionResult {
        if !outcome.success() {
            let state = match request.language {
                Language::Python => ExecutionState::Failed,
                Language::Cpp | Language::Java => ExecutionState::RuntimeError,
            };
            let mut result = ExecutionResult::empty(state);
            result.tests_run = 1;
            result.failed = 1;
            if state == ExecutionState::RuntimeError {
                result.runtime_error = outcome.stderr.clone();
            }
            result.failure_details.push(FailureDetail {
                test_case: "1".to_string(),
                expected: request.expected_output.trim().to_string(),
                received: outcome.stdout.trim().to_string(),
                error_message: "Program exited with a nonzero status".to_string(),
                rawout: format!("{}\n{}", outcome.stdout, outcome.stderr),
            });
            return result;
        }

        let matched = outcome.stdout.trim() == request.expected_output.trim();
        if matched {
            let mut result = ExecutionResult::empty(ExecutionState::Passed);
            result.tests_run = 1;
            result.passed = 1;
            result
        } else {
            let mut result = ExecutionResult::empty(ExecutionState::Failed);
            result.tests_run = 1;
            result.failed = 1;
            result.failure_details.push(FailureDetail {
                test_case: "1".to_string(),
                expected: request.expected_output.trim().to_string(),
                received: outcome.stdout.trim().to_string(),
                error_message: "Output did not match expected output".to_string(),
                rawout: format!("{}\n{}", outcome.stdout, outcome.stderr),
            });
            result
        }
    }
}
