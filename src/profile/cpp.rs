//! C++ / CxxTest profile.

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::ExecutorError;
use crate::parser::TestOutputParser;
use crate::parser::cxxtest::CxxTestParser;
use crate::process::ProcessDriver;
use crate::workspace::Workspace;

use super::{BuildOutcome, LanguageProfile, RunTarget};

static FUNCTION_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:int|bool|void|float|double|char|string)\s+(\w+)\s*\(([^)]*)\)\s*\{").unwrap()
});

/// Toolchain paths for the C++/CxxTest pipeline.
pub struct CppProfile {
    pub compiler: String,
    pub cxxtestgen: String,
    pub cxxtest_include_dir: Option<PathBuf>,
}

impl CppProfile {
    pub fn new(
        compiler: impl Into<String>,
        cxxtestgen: impl Into<String>,
        cxxtest_include_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            cxxtestgen: cxxtestgen.into(),
            cxxtest_include_dir,
        }
    }

    /// Forward-declares top-level functions found in `code`, so test code
    /// that references them without its own declaration still compiles.
    /// An enrichment, not a requirement — test code with its own
    /// declarations is untouched by this.
    fn forward_declarations(code: &str) -> String {
        FUNCTION_SIGNATURE
            .captures_iter(code)
            .map(|caps| {
                let whole = caps.get(0).unwrap().as_str();
                let signature = whole.trim_end_matches('{').trim_end();
                format!("{signature};\n")
            })
            .collect()
    }

    /// Compiler args for the runner binary, including `-I<cxxtest_include_dir>`
    /// when configured so `<cxxtest/TestSuite.h>` resolves off the default
    /// include path.
    fn runner_compile_args(&self) -> Vec<String> {
        let mut args = vec!["runner.cpp".to_string(), "program.cpp".to_string()];
        if let Some(include_dir) = &self.cxxtest_include_dir {
            args.push(format!("-I{}", include_dir.display()));
        }
        args.push("-o".to_string());
        args.push("runner".to_string());
        args
    }
}

#[async_trait]
impl LanguageProfile for CppProfile {
    async fn build_plain(
        &self,
        driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
    ) -> Result<BuildOutcome, ExecutorError> {
        workspace.write_file("program.cpp", code).await?;

        let result = driver
            .compile(
                &self.compiler,
                &["program.cpp".to_string(), "-o".to_string(), "program".to_string()],
                workspace.path(),
            )
            .await?;

        Ok(match result {
            Ok(()) => BuildOutcome::Ready(RunTarget {
                program: "./program".to_string(),
                args: Vec::new(),
            }),
            Err(stderr) => BuildOutcome::CompileError(stderr),
        })
    }

    async fn build_harness(
        &self,
        driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
        test_code: &str,
    ) -> Result<BuildOutcome, ExecutorError> {
        workspace.write_file("program.cpp", code).await?;

        let header = format!("{}{test_code}", Self::forward_declarations(code));
        workspace.write_file("test_program.h", header).await?;

        let gen_result = driver
            .compile(
                &self.cxxtestgen,
                &[
                    "--error-printer".to_string(),
                    "-o".to_string(),
                    "runner.cpp".to_string(),
                    "test_program.h".to_string(),
                ],
                workspace.path(),
            )
            .await?;
        if let Err(stderr) = gen_result {
            return Ok(BuildOutcome::CompileError(stderr));
        }

        let compile_result = driver
            .compile(&self.compiler, &self.runner_compile_args(), workspace.path())
            .await?;

        Ok(match compile_result {
            Ok(()) => BuildOutcome::Ready(RunTarget {
                program: "./runner".to_string(),
                args: Vec::new(),
            }),
            Err(stderr) => BuildOutcome::CompileError(stderr),
        })
    }

    fn parser(&self) -> &dyn TestOutputParser {
        &CxxTestParser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_declarations_extracts_top_level_functions() {
        let code = "int add(int a, int b) {\n    return a + b;\n}\n";
        let decls = CppProfile::forward_declarations(code);
        assert_eq!(decls, "int add(int a, int b);\n");
    }

    #[test]
    fn forward_declarations_empty_when_no_match() {
        assert_eq!(CppProfile::forward_declarations("struct Foo {};"), "");
    }

    #[test]
    fn runner_compile_args_omit_include_flag_by_default() {
        let profile = CppProfile::new("g++", "cxxtestgen", None);
        assert_eq!(
            profile.runner_compile_args(),
            vec!["runner.cpp", "program.cpp", "-o", "runner"]
        );
    }

    #[test]
    fn runner_compile_args_include_configured_cxxtest_dir() {
        let profile = CppProfile::new("g++", "cxxtestgen", Some(PathBuf::from("/opt/cxxtest")));
        assert_eq!(
            profile.runner_compile_args(),
            vec![
                "runner.cpp",
                "program.cpp",
                "-I/opt/cxxtest",
                "-o",
                "runner"
            ]
        );
    }
}
