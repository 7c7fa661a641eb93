use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config_manager::stateless_llm::StatelessLLMConfigs;
use crate::config_manager::system::SystemConfig;

/// Main configuration for the application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "llm_config")]
    #[serde(default)]
    pub llm_config: StatelessLLMConfigs,
}

impl Config {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: &str, lookup: &dyn Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_config, validate_config};
        let value = read_config(path, lookup)?;
        validate_config(value)
    }

    /// Try the candidate paths in order; fall back to defaults when none exists.
    ///
    /// A file that exists but fails to parse is an error, so a typo never
    /// silently degrades to the defaults.
    pub fn discover(
        paths: &[String],
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> anyhow::Result<(Self, Option<String>)> {
        for path in paths {
            if !std::path::Path::new(path).exists() {
                debug!("No config file at {}", path);
                continue;
            }
            let config = Self::load(path, lookup)
                .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
            info!("Loaded configuration from: {}", path);
            return Ok((config, Some(path.clone())));
        }

        warn!("No config file found (tried {:?}), using defaults", paths);
        Ok((Self::default(), None))
    }
}

/// Default list of paths searched for a configuration file.
pub fn default_config_paths(lookup: &dyn Fn(&str) -> Option<String>) -> Vec<String> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    vec![
        lookup("CONFIG_PATH"),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir
            .as_ref()
            .and_then(|d| d.join("conf.yaml").to_str().map(|s| s.to_string())),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Reads from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
