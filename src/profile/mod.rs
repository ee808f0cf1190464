//! Per-language build and run rules.
//!
//! Each [`LanguageProfile`] knows how to lay out source files in a
//! [`Workspace`], compile (or not) a plain program and a test harness, and
//! which [`TestOutputParser`] makes sense of the harness's stdout. Grounded
//! in the teacher's `TestFramework` trait (`framework.rs`): discover/build/
//! run/parse split into discrete async steps rather than one opaque
//! "execute" call.

pub mod cpp;
pub mod java;
pub mod python;

use async_trait::async_trait;

use crate::error::ExecutorError;
use crate::parser::TestOutputParser;
use crate::process::ProcessDriver;
use crate::workspace::Workspace;

/// A program ready to run: an executable/interpreter plus its arguments,
/// always invoked with the owning [`Workspace`]'s directory as `cwd`.
#[derive(Debug, Clone)]
pub struct RunTarget {
    pub program: String,
    pub args: Vec<String>,
}

/// Result of a build step: either a runnable target, or a compile failure
/// message to surface verbatim as `ExecutionResult::compilation_error`.
#[derive(Debug)]
pub enum BuildOutcome {
    Ready(RunTarget),
    CompileError(String),
}

/// Per-language build/run rules, resolved once per request from the
/// request's [`Language`](crate::request::Language).
#[async_trait]
pub trait LanguageProfile: Send + Sync {
    /// Prepares and (if applicable) compiles the plain, non-test program.
    async fn build_plain(
        &self,
        driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
    ) -> Result<BuildOutcome, ExecutorError>;

    /// Prepares and (if applicable) compiles the test harness.
    async fn build_harness(
        &self,
        driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
        test_code: &str,
    ) -> Result<BuildOutcome, ExecutorError>;

    /// The parser that makes sense of this language's test harness stdout.
    fn parser(&self) -> &dyn TestOutputParser;
}

fn classpath_separator() -> &'static str {
    if cfg!(windows) { ";" } else { ":" }
}
