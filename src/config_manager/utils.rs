use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

const ENV_PLACEHOLDER: &str = r"\$\{(\w+)\}";

/// Read a YAML or JSON configuration file with environment variable substitution
pub fn read_config(config_path: &str, lookup: &dyn Fn(&str) -> Option<String>) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Configuration file is empty: {}", config_path);
    }

    let content = substitute_env_vars(&content, lookup)?;

    let path_lower = config_path.to_lowercase();
    let value = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    debug!("Parsed configuration file {}", config_path);
    Ok(value)
}

/// Replace `${VAR_NAME}` with the looked-up value. Unknown variables are left as-is.
pub fn substitute_env_vars(content: &str, lookup: &dyn Fn(&str) -> Option<String>) -> Result<String> {
    let pattern = Regex::new(ENV_PLACEHOLDER)?;
    let replaced = pattern.replace_all(content, |caps: &Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// True when the value is still an unsubstituted `${VAR}` placeholder.
pub fn is_unresolved_placeholder(value: &str) -> bool {
    Regex::new(&format!("^{}$", ENV_PLACEHOLDER))
        .map(|re| re.is_match(value.trim()))
        .unwrap_or(false)
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data)?;
    Ok(config)
}

/// Load text file, falling back to GBK when the bytes are not UTF-8
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let mut bytes = fs::read(file_path)?;

    // Remove BOM if present
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(0..3);
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            let (cow, _, _) = encoding_rs::GBK.decode(e.as_bytes());
            Ok(cow.into_owned())
        }
    }
}
