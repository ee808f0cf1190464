//! # codepad
//!
//! A network-accessible code execution and testing service. `POST /execute`
//! accepts a language, source code, optional stdin/expected output, and an
//! optional test harness; compiles where the language requires it; runs the
//! program or harness under a bounded wall clock; and returns one canonical
//! JSON result regardless of which of the three supported pipelines ran.
//!
//! ## Supported languages
//!
//! - C++, tested with CxxTest ([`profile::cpp`], [`parser::cxxtest`])
//! - Java, tested with JUnit 4 ([`profile::java`], [`parser::junit`])
//! - Python, tested with pytest ([`profile::python`], [`parser::pytest`])
//!
//! ## Architecture
//!
//! ```text
//! server::execute_handler
//!         │
//!         ▼
//! executor::Executor::execute
//!         │
//!         ├─► workspace::Workspace::create
//!         ├─► profile::LanguageProfile::build_plain / build_harness
//!         ├─► process::ProcessDriver::run
//!         └─► parser::TestOutputParser::parse   (test mode only)
//!         │
//!         ▼
//! result::ExecutionResult
//! ```
//!
//! A [`session::SessionGate`] middleware guards the route; [`config::Config`]
//! supplies toolchain paths, timeouts, and the session store's connection
//! parameters.

pub mod bundled;
pub mod config;
pub mod error;
pub mod executor;
pub mod parser;
pub mod process;
pub mod profile;
pub mod request;
pub mod result;
pub mod server;
pub mod session;
pub mod workspace;

pub use config::{Config, load_config};
pub use executor::Executor;
pub use request::{ExecuteRequest, Language};
pub use result::{ExecutionResult, ExecutionState};
