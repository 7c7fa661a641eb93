//! Form controller: the per-session state behind the translation page.
//!
//! State machine: `Idle -> Busy -> Idle`. A submission is validated before it
//! leaves the controller, and only one provider call may be in flight per
//! controller at a time.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::TranslatorError;
use crate::translator::{TranslationRequest, TranslationResult, Translator};

pub const SUCCESS_NOTICE: &str = "Translation Complete:";
pub const FAILURE_NOTICE: &str = "Translation failed. Please try again.";
pub const BUSY_NOTICE: &str = "A translation is already in progress. Please wait.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Busy,
}

/// Message shown above the result area.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Warning(String),
    Success(String),
    Failure(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),

    #[error("a translation is already in progress")]
    Busy,

    #[error("translation failed: {0}")]
    Provider(String),
}

#[derive(Debug, Clone)]
pub struct FormController {
    input: String,
    status: FormStatus,
    result: Option<TranslationResult>,
    notice: Option<Notice>,
    last_seen: DateTime<Utc>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            status: FormStatus::Idle,
            result: None,
            notice: None,
            last_seen: Utc::now(),
        }
    }

    /// Stores the text verbatim.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.touch();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn result(&self) -> Option<&TranslationResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    /// Stores `text` and starts a submission, unless a call is already in flight.
    ///
    /// A busy form is left exactly as it was, input included, so the pending
    /// result still lands next to the text that produced it.
    pub fn begin_submit_with(
        &mut self,
        text: impl Into<String>,
    ) -> Result<TranslationRequest, FormError> {
        if self.status == FormStatus::Busy {
            debug!("Rejected submission while busy");
            return Err(FormError::Busy);
        }
        self.set_input(text);
        self.begin_submit()
    }

    /// Validates the stored input and marks the form busy.
    ///
    /// Blank input gets a warning notice. A submission while busy is rejected
    /// without touching any state. Neither touches the stored result.
    pub fn begin_submit(&mut self) -> Result<TranslationRequest, FormError> {
        if self.status == FormStatus::Busy {
            debug!("Rejected submission while busy");
            return Err(FormError::Busy);
        }

        match TranslationRequest::new(self.input.clone()) {
            Ok(request) => {
                self.status = FormStatus::Busy;
                Ok(request)
            }
            Err(e) => {
                let msg = match e {
                    TranslatorError::Validation(msg) => msg,
                    other => other.to_string(),
                };
                self.notice = Some(Notice::Warning(msg.clone()));
                Err(FormError::Validation(msg))
            }
        }
    }

    /// Returns the form to idle. A failure keeps the previous result on screen.
    pub fn finish_submit(
        &mut self,
        outcome: Result<TranslationResult, TranslatorError>,
    ) -> Result<(), FormError> {
        self.status = FormStatus::Idle;
        self.touch();
        match outcome {
            Ok(result) => {
                info!("Translation complete ({} chars)", result.text.chars().count());
                self.result = Some(result);
                self.notice = Some(Notice::Success(SUCCESS_NOTICE.to_string()));
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::Failure(FAILURE_NOTICE.to_string()));
                Err(FormError::Provider(e.to_string()))
            }
        }
    }

    /// Full submit cycle for a controller owned by a single caller.
    pub async fn submit(&mut self, translator: &Translator) -> Result<(), FormError> {
        let request = self.begin_submit()?;
        let outcome = translator.translate(&request).await;
        self.finish_submit(outcome)
    }
}
