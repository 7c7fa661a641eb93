//! Translation client.
//!
//! Wraps a [`StatelessLLMInterface`] with the fixed translator instructions.
//! One call to [`Translator::translate`] is exactly one provider request.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, TranslatorError};
use crate::llm::StatelessLLMInterface;
use crate::prompt::TRANSLATOR_INSTRUCTIONS;

/// Text the user asked to translate. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    raw_text: String,
}

impl TranslationRequest {
    /// Wraps the text verbatim; fails when it has no non-whitespace content.
    pub fn new(raw_text: impl Into<String>) -> Result<Self> {
        let raw_text = raw_text.into();
        if raw_text.trim().is_empty() {
            return Err(TranslatorError::Validation(
                "Please enter some text to translate.".to_string(),
            ));
        }
        Ok(Self { raw_text })
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// Final output of the provider, unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub text: String,
}

#[derive(Clone)]
pub struct Translator {
    llm: Arc<dyn StatelessLLMInterface>,
    instructions: &'static str,
}

impl Translator {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self {
            llm,
            instructions: TRANSLATOR_INSTRUCTIONS,
        }
    }

    /// Sends the instructions and the user's text as one chat completion.
    ///
    /// No retries. The output is returned exactly as the provider sent it.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        debug!("Translating {} chars", request.raw_text.chars().count());
        match self.llm.chat_completion(self.instructions, &request.raw_text).await {
            Ok(text) => Ok(TranslationResult { text }),
            Err(e) => {
                warn!("Translation failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockStatelessLLMInterface;

    #[test]
    fn test_request_rejects_blank_text() {
        for text in ["", "   ", "\n\t "] {
            assert!(matches!(
                TranslationRequest::new(text),
                Err(TranslatorError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_request_keeps_text_verbatim() {
        let request = TranslationRequest::new("  hola  \n").unwrap();
        assert_eq!(request.raw_text(), "  hola  \n");
    }

    #[tokio::test]
    async fn test_translate_passes_instructions_and_text() {
        let mut llm = MockStatelessLLMInterface::new();
        llm.expect_chat_completion()
            .withf(|system, input| {
                system.to_string() == TRANSLATOR_INSTRUCTIONS
                    && input.to_string() == "Translate to Urdu: I am learning."
            })
            .times(1)
            .returning(|_, _| Ok("میں سیکھ رہا ہوں۔".to_string()));

        let translator = Translator::new(Arc::new(llm));
        let request = TranslationRequest::new("Translate to Urdu: I am learning.").unwrap();
        let result = translator.translate(&request).await.unwrap();

        assert_eq!(result.text, "میں سیکھ رہا ہوں۔");
    }

    #[tokio::test]
    async fn test_translate_does_not_trim_output() {
        let mut llm = MockStatelessLLMInterface::new();
        llm.expect_chat_completion()
            .times(1)
            .returning(|_, _| Ok("  <b>Bonjour</b>\n".to_string()));

        let translator = Translator::new(Arc::new(llm));
        let result = translator
            .translate(&TranslationRequest::new("Hello").unwrap())
            .await
            .unwrap();

        assert_eq!(result.text, "  <b>Bonjour</b>\n");
    }

    #[tokio::test]
    async fn test_translate_propagates_provider_error() {
        let mut llm = MockStatelessLLMInterface::new();
        llm.expect_chat_completion()
            .times(1)
            .returning(|_, _| Err(TranslatorError::Provider("request timed out".to_string())));

        let translator = Translator::new(Arc::new(llm));
        let err = translator
            .translate(&TranslationRequest::new("Hello").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, TranslatorError::Provider("request timed out".to_string()));
    }

    #[test]
    fn test_instructions_carry_authorship_answer() {
        assert!(TRANSLATOR_INSTRUCTIONS.contains("I was created by Muhammad Samad."));
        assert!(TRANSLATOR_INSTRUCTIONS.contains("Automatically detect the source language"));
    }
}
