//! The `POST /execute` request body and the `Language` it selects a profile by.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One of the three supported languages. Case-insensitive when parsed from
/// the wire (`"C++"`, `"cpp"`, `"CPP"` all resolve to [`Language::Cpp`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Java,
    Python,
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "python",
        };
        f.write_str(name)
    }
}

/// Error returned when a request names a language outside the closed set.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Language::Cpp),
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Body of `POST /execute`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub stdin: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub run_tests: bool,
    #[serde(default)]
    pub test_code: String,
}

impl ExecuteRequest {
    /// Validates the fields `serde`'s `Deserialize` can't express on its own:
    /// non-empty `code`, and non-empty `test_code` when `run_tests` is set.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.code.trim().is_empty() {
            return Err("code must not be empty");
        }
        if self.run_tests && self.test_code.trim().is_empty() {
            return Err("test_code must not be empty when run_tests is true");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_str_is_case_insensitive() {
        assert_eq!("CPP".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("C++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("Java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert!("ruby".parse::<Language>().is_err());
    }

    #[test]
    fn language_deserializes_case_insensitively_from_json() {
        let req: ExecuteRequest =
            serde_json::from_str(r#"{"language": "C++", "code": "int main(){}"}"#).unwrap();
        assert_eq!(req.language, Language::Cpp);

        let req: ExecuteRequest =
            serde_json::from_str(r#"{"language": "Java", "code": "class X {}"}"#).unwrap();
        assert_eq!(req.language, Language::Java);

        let err = serde_json::from_str::<ExecuteRequest>(r#"{"language": "ruby", "code": "x"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unrecognized language"));
    }

    #[test]
    fn validate_rejects_empty_code() {
        let req = ExecuteRequest {
            language: Language::Python,
            code: "   ".to_string(),
            stdin: String::new(),
            expected_output: String::new(),
            run_tests: false,
            test_code: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn validate_requires_test_code_when_run_tests() {
        let req = ExecuteRequest {
            language: Language::Python,
            code: "print(1)".to_string(),
            stdin: String::new(),
            expected_output: String::new(),
            run_tests: true,
            test_code: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
