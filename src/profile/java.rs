//! Java / JUnit profile.

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::bundled::junit_test_runner_source;
use crate::error::ExecutorError;
use crate::parser::TestOutputParser;
use crate::parser::junit::JunitParser;
use crate::process::ProcessDriver;
use crate::workspace::Workspace;

use super::{BuildOutcome, LanguageProfile, RunTarget, classpath_separator};

static PUBLIC_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public\s+class\s+(\w+)").unwrap());

fn extract_class_name(source: &str) -> Option<&str> {
    PUBLIC_CLASS.captures(source).map(|c| c.get(1).unwrap().as_str())
}

/// Toolchain paths for the Java/JUnit pipeline.
pub struct JavaProfile {
    pub javac: String,
    pub java: String,
    pub classpath_jars: Vec<PathBuf>,
}

impl JavaProfile {
    pub fn new(javac: impl Into<String>, java: impl Into<String>, classpath_jars: Vec<PathBuf>) -> Self {
        Self {
            javac: javac.into(),
            java: java.into(),
            classpath_jars,
        }
    }

    fn jars_classpath(&self) -> String {
        self.classpath_jars
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(classpath_separator())
    }
}

#[async_trait]
impl LanguageProfile for JavaProfile {
    async fn build_plain(
        &self,
        driver: &ProcessDriver,
        workspace: &Workspace,
        code: &str,
    ) -> Result<BuildOutcome, ExecutorError> {
        let Some(class_name) = extract_class_name(code) else {
            return Ok(BuildOutcome::CompileError(
                "could not find a public class declaration".to_string(),
            ));
        };
        let class_name = class_name.to_string();

        workspace
            .write_file(format!("{class_name}.java"), code)
            .await?;

        let result = driver
            .compile(
                &self.javac,
                &[
                    "-d".to_string(),
                    ".".to_string(),
                    format!("{class_name}.java"),
                ],
                workspace.path(),
            )
            .await?;

        Ok(match result {
            Ok(()) => BuildOutcome::Ready(RunTarget {
                program: self.java.clone(),
                args: vec!["-cp".to_string(), ".".to_string(), class_name],
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
        let Some(class_name) = extract_class_name(code) else {
            return Ok(BuildOutcome::CompileError(
                "could not find a public class declaration in code".to_string(),
            ));
        };
        let Some(test_class_name) = extract_class_name(test_code) else {
            return Ok(BuildOutcome::CompileError(
                "could not find a public class declaration in test_code".to_string(),
            ));
        };
        let class_name = class_name.to_string();
        let test_class_name = test_class_name.to_string();

        workspace
            .write_file(format!("{class_name}.java"), code)
            .await?;
        workspace
            .write_file(format!("{test_class_name}.java"), test_code)
            .await?;

        let runner_source = junit_test_runner_source(&test_class_name)?;
        workspace.write_file("TestRunner.java", runner_source).await?;

        let jars = self.jars_classpath();
        let classpath = if jars.is_empty() {
            ".".to_string()
        } else {
            format!(".{}{jars}", classpath_separator())
        };

        let result = driver
            .compile(
                &self.javac,
                &[
                    "-d".to_string(),
                    ".".to_string(),
                    "-cp".to_string(),
                    classpath.clone(),
                    format!("{class_name}.java"),
                    format!("{test_class_name}.java"),
                    "TestRunner.java".to_string(),
                ],
                workspace.path(),
            )
            .await?;

        Ok(match result {
            Ok(()) => BuildOutcome::Ready(RunTarget {
                program: self.java.clone(),
                args: vec!["-cp".to_string(), classpath, "TestRunner".to_string()],
            }),
            Err(stderr) => BuildOutcome::CompileError(stderr),
        })
    }

    fn parser(&self) -> &dyn TestOutputParser {
        &JunitParser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_public_class_name() {
        assert_eq!(
            extract_class_name("public class AddTest extends TestCase {}"),
            Some("AddTest")
        );
    }

    #[test]
    fn no_public_class_is_none() {
        assert_eq!(extract_class_name("class Foo {}"), None);
    }
}
