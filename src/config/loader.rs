//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::OliConfig;
use crate::domain::errors::OliError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into OliConfig
/// 4. Applies environment variable overrides (OLI_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use oli::config::loader::load_config;
///
/// let config = load_config("oli.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<OliConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(OliError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        OliError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file read.
pub fn load_config_str(contents: &str) -> Result<OliConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: OliConfig = toml::from_str(&contents)
        .map_err(|e| OliError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| {
        OliError::Configuration(format!("Invalid substitution pattern: {e}"))
    })?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(OliError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using OLI_* prefix
///
/// Environment variables follow the pattern: OLI_<SECTION>_<KEY>
/// For example: OLI_APPLICATION_LOG_LEVEL, OLI_ANALYZER_SCORE_THRESHOLD
fn apply_env_overrides(config: &mut OliConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("OLI_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Analyzer overrides
    config.analyzer.apply_env_overrides()?;

    // Logging overrides
    if let Ok(val) = std::env::var("OLI_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            OliError::Configuration(format!("Invalid OLI_LOGGING_LOCAL_ENABLED value: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("OLI_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("OLI_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
