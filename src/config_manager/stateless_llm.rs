use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible chat-completions provider.
///
/// Every field is optional so a provider section may be reduced to just the
/// API key; the remaining values come from the provider preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAICompatibleConfig {
    #[serde(rename = "base_url")]
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(rename = "llm_api_key")]
    #[serde(default)]
    pub llm_api_key: String,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub temperature: Option<f32>,

    /// Overrides the transport's default request timeout.
    #[serde(rename = "timeout_secs")]
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Pool of LLM provider configurations plus the selected provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatelessLLMConfigs {
    #[serde(rename = "llm_provider")]
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(rename = "openai_compatible_llm")]
    pub openai_compatible_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "gemini_llm")]
    pub gemini_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "openai_llm")]
    pub openai_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "deepseek_llm")]
    pub deepseek_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "groq_llm")]
    pub groq_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "mistral_llm")]
    pub mistral_llm: Option<OpenAICompatibleConfig>,

    #[serde(rename = "ollama_llm")]
    pub ollama_llm: Option<OpenAICompatibleConfig>,
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

impl StatelessLLMConfigs {
    /// Section for the selected provider, if the file has one.
    pub fn selected(&self) -> Option<&OpenAICompatibleConfig> {
        match self.llm_provider.as_str() {
            "openai_compatible_llm" => self.openai_compatible_llm.as_ref(),
            "gemini_llm" => self.gemini_llm.as_ref(),
            "openai_llm" => self.openai_llm.as_ref(),
            "deepseek_llm" => self.deepseek_llm.as_ref(),
            "groq_llm" => self.groq_llm.as_ref(),
            "mistral_llm" => self.mistral_llm.as_ref(),
            "ollama_llm" => self.ollama_llm.as_ref(),
            _ => None,
        }
    }
}

impl Default for StatelessLLMConfigs {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            openai_compatible_llm: None,
            gemini_llm: None,
            openai_llm: None,
            deepseek_llm: None,
            groq_llm: None,
            mistral_llm: None,
            ollama_llm: None,
        }
    }
}
