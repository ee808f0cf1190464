//! Bundled resources embedded directly into the binary.
//!
//! The Java profile needs `TestRunner.java` at harness-build time, but the
//! service should have no install-time dependency beyond the three external
//! toolchains it shells out to — so, like the teacher's `bundled` module
//! embeds provider scripts with `include_dir!`, this embeds the runner
//! template and rewrites its target-class placeholder on demand instead of
//! reading it from a runtime path.

use include_dir::{Dir, include_dir};

static RESOURCES: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources");

const TARGET_CLASS_PLACEHOLDER: &str = "__TARGET_TEST_CLASS__";

/// Errors raised while materializing a bundled resource.
#[derive(Debug, thiserror::Error)]
pub enum BundledError {
    #[error("bundled resource not found: {0}")]
    NotFound(&'static str),
    #[error("bundled resource {0} is not valid UTF-8")]
    NotUtf8(&'static str),
}

/// Returns the `TestRunner.java` source with every occurrence of its
/// target-class placeholder rewritten to `test_class`.
pub fn junit_test_runner_source(test_class: &str) -> Result<String, BundledError> {
    let file = RESOURCES
        .get_file("TestRunner.java")
        .ok_or(BundledError::NotFound("TestRunner.java"))?;
    let template = file
        .contents_utf8()
        .ok_or(BundledError::NotUtf8("TestRunner.java"))?;
    Ok(template.replace(TARGET_CLASS_PLACEHOLDER, test_class))
}
