use async_trait::async_trait;

use crate::error::Result;

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory; every call carries its own system prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Run one chat completion and return the final output text unmodified
    async fn chat_completion(&self, system: &str, input: &str) -> Result<String>;
}
