//! Python / pytest profile.
//!
//! There is no compile step for either the plain program or the harness —
//! per `SPEC_FULL.md` §4.5, a failure writing the workspace is the only way
//! this profile can fail before running, and that failure surfaces as
//! `execution_error` rather than `compile_error` (there is no true compile
//! phase to conflate it with).

use async_trait::async_trait;

use crate::error::ExecutorError;
use crate::parser::TestOutputParser;
use crate::parser::pytest::PytestParser;
use crate::process::ProcessDriver;
use crate::workspace::Workspace;

use super::{BuildOutcome, LanguageProfile, RunTarget};

/// Toolchain path for the Python/pytest pipeline.
pub struct PythonProfile {
    pub python: String,
}

impl PythonProfile {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

#[async_trait]
impl LanguageProfile for PythonProfile {
    async fn build_plain(
        &self,
        _driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
    ) -> Result<BuildOutcome, ExecutorError> {
        workspace.write_file("program.py", code).await?;
        Ok(BuildOutcome::Ready(RunTarget {
            program: self.python.clone(),
            args: vec!["program.py".to_string()],
        }))
    }

    async fn build_harness(
        &self,
        _driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
        test_code: &str,
    ) -> Result<BuildOutcome, ExecutorError> {
        workspace.write_file("program.py", code).await?;
        workspace.write_file("test_program.py", test_code).await?;
        Ok(BuildOutcome::Ready(RunTarget {
            program: "pytest".to_string(),
            args: vec!["test_program.py".to_string()],
        }))
    }

    fn parser(&self) -> &dyn TestOutputParser {
        &PytestParser
    }
}
