use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config_manager::utils::is_unresolved_placeholder;
use crate::config_manager::StatelessLLMConfigs;
use crate::error::{Result, TranslatorError};
use crate::llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::llm::stateless_llm_interface::StatelessLLMInterface;

/// Built-in defaults for a named provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderPreset {
    /// Name shown to users, e.g. in the page subtitle.
    pub display_name: &'static str,
    pub base_url: &'static str,
    pub model: &'static str,
    /// Environment variable consulted when the config file carries no key.
    /// `None` means the provider works without a credential.
    pub api_key_env: Option<&'static str>,
}

pub fn provider_preset(llm_provider: &str) -> Option<ProviderPreset> {
    let preset = match llm_provider {
        "gemini_llm" => ProviderPreset {
            display_name: "Gemini API",
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai/",
            model: "gemini-2.0-flash",
            api_key_env: Some("GEMINI_API_KEY"),
        },
        "openai_llm" => ProviderPreset {
            display_name: "OpenAI API",
            base_url: "https://api.openai.com/v1",
            model: "gpt-4o-mini",
            api_key_env: Some("OPENAI_API_KEY"),
        },
        // base_url and model must come from the config file
        "openai_compatible_llm" => ProviderPreset {
            display_name: "OpenAI-compatible API",
            base_url: "",
            model: "",
            api_key_env: Some("LLM_API_KEY"),
        },
        "deepseek_llm" => ProviderPreset {
            display_name: "DeepSeek API",
            base_url: "https://api.deepseek.com/v1",
            model: "deepseek-chat",
            api_key_env: Some("DEEPSEEK_API_KEY"),
        },
        "groq_llm" => ProviderPreset {
            display_name: "Groq API",
            base_url: "https://api.groq.com/openai/v1",
            model: "llama3-8b-8192",
            api_key_env: Some("GROQ_API_KEY"),
        },
        "mistral_llm" => ProviderPreset {
            display_name: "Mistral API",
            base_url: "https://api.mistral.ai/v1",
            model: "mistral-small-latest",
            api_key_env: Some("MISTRAL_API_KEY"),
        },
        "ollama_llm" => ProviderPreset {
            display_name: "Ollama",
            base_url: "http://localhost:11434/v1",
            model: "qwen2.5:latest",
            api_key_env: None,
        },
        _ => return None,
    };
    Some(preset)
}

/// Fully resolved provider settings, built once at startup.
#[derive(Clone)]
pub struct LLMSettings {
    pub llm_provider: String,
    pub display_name: String,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: Option<f32>,
    pub timeout: Option<Duration>,
}

// Keeps the credential out of logs.
impl fmt::Debug for LLMSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMSettings")
            .field("llm_provider", &self.llm_provider)
            .field("display_name", &self.display_name)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Merge the selected provider's config section with its preset and
    /// resolve the credential.
    ///
    /// The key in the config file wins unless it is blank or an unresolved
    /// `${VAR}`; then the preset's environment variable is consulted. A
    /// provider that needs a key and has none is a configuration error.
    pub fn resolve_settings(
        configs: &StatelessLLMConfigs,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<LLMSettings> {
        let llm_provider = configs.llm_provider.as_str();
        let preset = provider_preset(llm_provider).ok_or_else(|| {
            TranslatorError::Configuration(format!("Unsupported LLM provider: {}", llm_provider))
        })?;
        let section = configs.selected().cloned().unwrap_or_default();

        let base_url = non_blank(section.base_url)
            .unwrap_or_else(|| preset.base_url.to_string());
        if base_url.is_empty() {
            return Err(TranslatorError::Configuration(format!(
                "base_url is required for {}",
                llm_provider
            )));
        }

        let model = non_blank(section.model).unwrap_or_else(|| preset.model.to_string());
        if model.is_empty() {
            return Err(TranslatorError::Configuration(format!(
                "model is required for {}",
                llm_provider
            )));
        }

        let configured_key = Some(section.llm_api_key)
            .filter(|k| !k.trim().is_empty() && !is_unresolved_placeholder(k));
        let api_key = match (configured_key, preset.api_key_env) {
            (Some(key), _) => key,
            (None, Some(var)) => non_blank(lookup(var)).ok_or_else(|| {
                TranslatorError::Configuration(format!(
                    "{} is not set. Add llm_api_key to the {} section or export {}",
                    var, llm_provider, var
                ))
            })?,
            (None, None) => llm_provider.to_string(),
        };

        Ok(LLMSettings {
            llm_provider: llm_provider.to_string(),
            display_name: preset.display_name.to_string(),
            base_url,
            model,
            api_key,
            temperature: section.temperature,
            timeout: section.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Create an LLM from resolved settings.
    pub fn create_llm(settings: LLMSettings) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", settings.llm_provider);
        Ok(Arc::new(OpenAICompatibleLLM::new(settings)?))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
