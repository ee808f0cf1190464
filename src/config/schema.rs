//! Configuration schema for the codepad service.
//!
//! # Schema Overview
//!
//! ```text
//! Config (root)
//! ├── ServerConfig     - bind address
//! ├── ProcessConfig    - default run timeout, temp root
//! ├── SessionConfig    - Redis session-store parameters
//! └── LanguagesConfig  - per-language toolchain paths
//!     ├── CppConfig
//!     ├── JavaConfig
//!     └── PythonConfig
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub process: ProcessConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub languages: LanguagesConfig,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the `/execute` HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

/// Execution engine settings shared by every language profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessConfig {
    /// Wall-clock deadline for the plain program or test harness, in
    /// milliseconds. Does not apply to compile steps (`spec.md` §4.1).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Root directory under which per-request [`Workspace`](crate::workspace::Workspace)
    /// directories are created.
    #[serde(default = "default_temp_root")]
    pub temp_root: PathBuf,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            temp_root: default_temp_root(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_temp_root() -> PathBuf {
    std::env::temp_dir().join("codepad")
}

/// Redis-backed session store parameters for the [`SessionGate`](crate::session::SessionGate).
///
/// Overridable at runtime by the `REDIS_HOST`/`REDIS_PORT`/`REDIS_PREFIX`
/// environment variables named in `spec.md` §6, which win over the file
/// value (see [`crate::config::load_config`]).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_redis_host")]
    pub redis_host: String,
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,
    #[serde(default = "default_redis_prefix")]
    pub redis_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            redis_host: default_redis_host(),
            redis_port: default_redis_port(),
            redis_prefix: default_redis_prefix(),
        }
    }
}

fn default_redis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_redis_prefix() -> String {
    "sess".to_string()
}

/// Per-language toolchain configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LanguagesConfig {
    #[serde(default)]
    pub cpp: CppConfig,
    #[serde(default)]
    pub java: JavaConfig,
    #[serde(default)]
    pub python: PythonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CppConfig {
    #[serde(default = "default_cpp_compiler")]
    pub compiler: String,
    #[serde(default = "default_cxxtestgen")]
    pub cxxtestgen: String,
    #[serde(default)]
    pub cxxtest_include_dir: Option<PathBuf>,
}

impl Default for CppConfig {
    fn default() -> Self {
        Self {
            compiler: default_cpp_compiler(),
            cxxtestgen: default_cxxtestgen(),
            cxxtest_include_dir: None,
        }
    }
}

fn default_cpp_compiler() -> String {
    "g++".to_string()
}

fn default_cxxtestgen() -> String {
    "cxxtestgen".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JavaConfig {
    #[serde(default = "default_javac")]
    pub javac: String,
    #[serde(default = "default_java")]
    pub java: String,
    /// Jars placed on the classpath alongside the user's and the bundled
    /// `TestRunner` class (typically JUnit 4 + Hamcrest).
    #[serde(default)]
    pub classpath_jars: Vec<PathBuf>,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            javac: default_javac(),
            java: default_java(),
            classpath_jars: Vec::new(),
        }
    }
}

fn default_javac() -> String {
    "javac".to_string()
}

fn default_java() -> String {
    "java".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PythonConfig {
    #[serde(default = "default_python")]
    pub python: String,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
        }
    }
}

fn default_python() -> String {
    "python3".to_string()
}
