//! Configuration loading for the codepad service.
//!
//! Configuration is TOML, loaded via [`load_config`]/[`load_config_str`], with
//! `${VAR}` / `${VAR:-default}` environment expansion applied to string
//! fields before the explicit env-var overrides named in `spec.md` §6
//! (`PORT`, `REDIS_HOST`, `REDIS_PORT`, `REDIS_PREFIX`) are applied last.

pub mod schema;

pub use schema::*;

use std::path::Path;

use anyhow::{Context, Result};

/// Loads configuration from a TOML file, falling back to built-in defaults
/// if the file doesn't exist so the service is runnable with zero
/// configuration for local testing.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(apply_env_overrides(Config::default()));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    load_config_str(&content)
}

/// Loads configuration from a TOML string.
pub fn load_config_str(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content).context("Failed to parse config")?;

    expand_env_in_config(&mut config)?;

    Ok(apply_env_overrides(config))
}

/// Expands `${VAR}` references in every string-valued config field that
/// plausibly carries one (toolchain paths, bind address).
fn expand_env_in_config(config: &mut Config) -> Result<()> {
    config.server.bind = expand_env_value(&config.server.bind)
        .map_err(|e| anyhow::anyhow!("server.bind: {e}"))?;
    config.languages.cpp.compiler = expand_env_value(&config.languages.cpp.compiler)
        .map_err(|e| anyhow::anyhow!("languages.cpp.compiler: {e}"))?;
    config.languages.java.javac = expand_env_value(&config.languages.java.javac)
        .map_err(|e| anyhow::anyhow!("languages.java.javac: {e}"))?;
    config.languages.java.java = expand_env_value(&config.languages.java.java)
        .map_err(|e| anyhow::anyhow!("languages.java.java: {e}"))?;
    config.languages.python.python = expand_env_value(&config.languages.python.python)
        .map_err(|e| anyhow::anyhow!("languages.python.python: {e}"))?;
    Ok(())
}

/// Applies the explicit env-var overrides `spec.md` §6 names for the
/// session gate and HTTP port. These win over both the file value and any
/// `${VAR}` expansion within it.
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(port) = std::env::var("PORT") {
        let host = config
            .server
            .bind
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.server.bind = format!("{host}:{port}");
    }
    if let Ok(host) = std::env::var("REDIS_HOST") {
        config.session.redis_host = host;
    }
    if let Ok(port) = std::env::var("REDIS_PORT")
        && let Ok(port) = port.parse()
    {
        config.session.redis_port = port;
    }
    if let Ok(prefix) = std::env::var("REDIS_PREFIX") {
        config.session.redis_prefix = prefix;
    }
    config
}

/// Expands `${VAR}` / `${VAR:-default}` references in a string value.
///
/// - `${VAR}` — required, fails if `VAR` is not set.
/// - `${VAR:-default}` — optional, falls back to `default` if `VAR` is unset.
/// - `$$` — escaped dollar sign, becomes a single `$`.
fn expand_env_value(value: &str) -> Result<String, String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                result.push('$');
            }
            Some('{') => {
                chars.next();
                let mut var_content = String::new();
                let mut found_close = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        found_close = true;
                        break;
                    }
                    var_content.push(c);
                }
                if !found_close {
                    return Err(format!("Unclosed variable reference: ${{{var_content}"));
                }

                let (var_name, default_value) = if let Some(idx) = var_content.find(":-") {
                    let (name, rest) = var_content.split_at(idx);
                    (name, Some(&rest[2..]))
                } else {
                    (var_content.as_str(), None)
                };

                if var_name.is_empty() {
                    return Err("Empty variable name in ${}".to_string());
                }

                match std::env::var(var_name) {
                    Ok(val) => result.push_str(&val),
                    Err(_) => match default_value {
                        Some(default) => result.push_str(default),
                        None => {
                            return Err(format!(
                                "Required environment variable not set: {var_name}"
                            ));
                        }
                    },
                }
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = load_config(Path::new("/nonexistent/codepad.toml")).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn parses_overrides_from_toml() {
        let config = load_config_str(
            r#"
            [server]
            bind = "127.0.0.1:8080"

            [languages.cpp]
            compiler = "clang++"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.languages.cpp.compiler, "clang++");
        assert_eq!(config.languages.python.python, "python3");
    }

    #[test]
    fn expand_env_value_escaped_dollar() {
        assert_eq!(expand_env_value("price is $$100").unwrap(), "price is $100");
    }

    #[test]
    fn expand_env_value_default_used_when_unset() {
        let result = expand_env_value("${_CODEPAD_TEST_MISSING:-fallback}").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn expand_env_value_required_var_missing_errors() {
        assert!(expand_env_value("${_CODEPAD_TEST_NONEXISTENT_VAR}").is_err());
    }

    #[test]
    fn env_var_overrides_win_over_file() {
        // SAFETY: test-local env var, no concurrent access from other tests of this name.
        unsafe {
            std::env::set_var("REDIS_PREFIX", "override-prefix");
        }
        let config = load_config_str("").unwrap();
        assert_eq!(config.session.redis_prefix, "override-prefix");
        unsafe {
            std::env::remove_var("REDIS_PREFIX");
        }
    }
}
