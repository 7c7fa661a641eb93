pub mod main;
pub mod stateless_llm;
pub mod system;
pub mod utils;

pub use main::{default_config_paths, env_lookup, Config};
pub use stateless_llm::{OpenAICompatibleConfig, StatelessLLMConfigs};
pub use system::SystemConfig;
