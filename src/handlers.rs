use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::TranslatorError;
use crate::form::{FormError, Notice, BUSY_NOTICE, FAILURE_NOTICE};
use crate::page::{render_page, PageView};
use crate::state::{lock_form, AppState, SharedForm};
use crate::translator::TranslationRequest;

#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateApiRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateApiResponse {
    pub translation: String,
}

/// Serves an empty page. The session is created on the first submission.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_view(&state, &PageView::default()))
}

/// Runs one submit cycle for the posting session and re-renders the page.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(payload): Form<TranslateForm>,
) -> Html<String> {
    let (session_id, form) = state.sessions.get_or_create(&payload.session_id);

    let request = lock_form(&form).begin_submit_with(payload.text);
    let mut busy_notice = None;

    match request {
        Ok(request) => {
            // The provider call runs on its own task so a dropped connection
            // cannot leave the session stuck busy.
            let translator = state.translator.clone();
            let task_form = form.clone();
            let task = tokio::spawn(async move {
                let outcome = translator.translate(&request).await;
                lock_form(&task_form).finish_submit(outcome)
            });
            match task.await {
                Ok(Ok(())) => info!("Session {} translated", session_id),
                Ok(Err(e)) => warn!("Session {}: {}", session_id, e),
                Err(e) => {
                    warn!("Translation task for session {} failed: {}", session_id, e);
                    let err = TranslatorError::Provider(e.to_string());
                    let _ = lock_form(&form).finish_submit(Err(err));
                }
            }
        }
        Err(FormError::Busy) => {
            info!("Session {} submitted while busy", session_id);
            busy_notice = Some(Notice::Warning(BUSY_NOTICE.to_string()));
        }
        Err(e) => info!("Session {} rejected: {}", session_id, e),
    }

    Html(render(&state, session_id, &form, busy_notice))
}

/// Stateless JSON variant of the form.
pub async fn translate_api(
    State(state): State<AppState>,
    Json(payload): Json<TranslateApiRequest>,
) -> Result<Json<TranslateApiResponse>, (StatusCode, Json<Value>)> {
    let request = TranslationRequest::new(payload.text)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": error_message(e) }))))?;

    let result = state.translator.translate(&request).await.map_err(|e| {
        warn!("API translation failed: {}", e);
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": FAILURE_NOTICE })))
    })?;

    Ok(Json(TranslateApiResponse {
        translation: result.text,
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.llm_provider,
        "model": state.model,
    }))
}

/// Renders the session's page. `notice` replaces the stored notice for this
/// response only.
fn render(
    state: &AppState,
    session_id: String,
    form: &SharedForm,
    notice: Option<Notice>,
) -> String {
    let view = {
        let form = lock_form(form);
        PageView {
            session_id,
            input: form.input().to_string(),
            notice: notice.or_else(|| form.notice().cloned()),
            result: form.result().map(|r| r.text.clone()),
        }
    };
    render_view(state, &view)
}

fn render_view(state: &AppState, view: &PageView) -> String {
    let system = &state.config.system_config;
    render_page(&system.app_title, &system.author, &state.provider_name, view)
}

fn error_message(err: TranslatorError) -> String {
    match err {
        TranslatorError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

