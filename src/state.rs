use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config_manager::Config;
use crate::error::Result;
use crate::form::FormController;
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::translator::Translator;

pub type SharedForm = Arc<Mutex<FormController>>;

/// Upper bound for the configured session ttl (ten years).
const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Longest gap between two sweeps triggered by session creation.
const MAX_SWEEP_INTERVAL_SECS: i64 = 60;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm_provider: String,
    /// Provider name shown in the page subtitle.
    pub provider_name: String,
    pub model: String,
    pub translator: Translator,
    pub sessions: Arc<SessionStore>,
}

/// In-memory form sessions keyed by a random id.
pub struct SessionStore {
    sessions: DashMap<String, SharedForm>,
    ttl: chrono::Duration,
    sweep_interval: chrono::Duration,
    last_sweep: Mutex<DateTime<Utc>>,
}

impl AppState {
    /// Resolves the provider settings and builds the client.
    ///
    /// Fails with a configuration error when the credential is missing, so the
    /// server never starts without one.
    pub fn new(config: Config, lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let settings = StatelessLLMFactory::resolve_settings(&config.llm_config, lookup)?;
        let llm_provider = settings.llm_provider.clone();
        let provider_name = settings.display_name.clone();
        let model = settings.model.clone();
        let llm = StatelessLLMFactory::create_llm(settings)?;
        Ok(Self::with_llm(config, llm_provider, provider_name, model, llm))
    }

    pub fn with_llm(
        config: Config,
        llm_provider: String,
        provider_name: String,
        model: String,
        llm: Arc<dyn StatelessLLMInterface>,
    ) -> Self {
        let ttl_secs = config.system_config.session_ttl_secs.min(MAX_SESSION_TTL_SECS) as i64;
        let sessions = Arc::new(SessionStore::new(chrono::Duration::seconds(ttl_secs)));
        Self {
            config,
            llm_provider,
            provider_name,
            model,
            translator: Translator::new(llm),
            sessions,
        }
    }
}

impl SessionStore {
    /// Sweeps at most once per ttl, and at least once a minute.
    pub fn new(ttl: chrono::Duration) -> Self {
        let interval = ttl
            .min(chrono::Duration::seconds(MAX_SWEEP_INTERVAL_SECS))
            .max(chrono::Duration::zero());
        Self::with_sweep_interval(ttl, interval)
    }

    pub fn with_sweep_interval(ttl: chrono::Duration, sweep_interval: chrono::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            sweep_interval,
            last_sweep: Mutex::new(Utc::now()),
        }
    }

    /// Creates a fresh session, sweeping idle ones first when a sweep is due.
    pub fn create(&self) -> (String, SharedForm) {
        self.maybe_sweep();
        let session_id = Uuid::new_v4().to_string();
        let form = Arc::new(Mutex::new(FormController::new()));
        self.sessions.insert(session_id.clone(), form.clone());
        debug!("Created session {}", session_id);
        (session_id, form)
    }

    /// Looks the session up, or starts a new one when the id is unknown or expired.
    pub fn get_or_create(&self, session_id: &str) -> (String, SharedForm) {
        if let Some(form) = self.sessions.get(session_id).map(|e| e.value().clone()) {
            return (session_id.to_string(), form);
        }
        self.create()
    }

    fn maybe_sweep(&self) {
        let now = Utc::now();
        {
            let mut last = self.last_sweep.lock().unwrap_or_else(|p| p.into_inner());
            if now - *last < self.sweep_interval {
                return;
            }
            *last = now;
        }
        self.sweep_expired();
    }

    /// Drops sessions idle for longer than the ttl. Busy sessions are kept.
    pub fn sweep_expired(&self) {
        let cutoff = Utc::now() - self.ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, form| {
            let form = lock_form(form);
            form.status() == crate::form::FormStatus::Busy || form.last_seen() >= cutoff
        });
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!("Evicted {} idle sessions", removed);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Locks a form, recovering the data if a previous holder panicked.
pub fn lock_form(form: &SharedForm) -> MutexGuard<'_, FormController> {
    form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_startup_fails_without_credential() {
        assert!(matches!(
            AppState::new(Config::default(), &no_env),
            Err(crate::error::TranslatorError::Configuration(_))
        ));
    }

    #[test]
    fn test_startup_succeeds_with_env_credential() {
        let lookup = |name: &str| (name == "GEMINI_API_KEY").then(|| "k".to_string());
        let state = AppState::new(Config::default(), &lookup).unwrap();
        assert_eq!(state.llm_provider, "gemini_llm");
        assert_eq!(state.provider_name, "Gemini API");
        assert_eq!(state.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_get_or_create_reuses_known_session() {
        let store = SessionStore::new(chrono::Duration::hours(1));
        let (id, form) = store.create();
        lock_form(&form).set_input("kept");

        let (same_id, same_form) = store.get_or_create(&id);
        assert_eq!(same_id, id);
        assert_eq!(lock_form(&same_form).input(), "kept");

        let (new_id, _) = store.get_or_create("unknown");
        assert_ne!(new_id, "unknown");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sweep_drops_idle_sessions() {
        let store = SessionStore::new(chrono::Duration::zero() - chrono::Duration::seconds(1));
        store.create();
        store.create();
        store.sweep_expired();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_sweep_keeps_busy_sessions() {
        let store = SessionStore::new(chrono::Duration::zero() - chrono::Duration::seconds(1));
        let (_, form) = store.create();
        {
            let mut form = lock_form(&form);
            form.set_input("Hello");
            form.begin_submit().unwrap();
        }
        store.sweep_expired();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_sweeps_only_when_interval_elapsed() {
        let expired = chrono::Duration::zero() - chrono::Duration::seconds(1);

        let throttled = SessionStore::with_sweep_interval(expired, chrono::Duration::hours(1));
        throttled.create();
        throttled.create();
        assert_eq!(throttled.len(), 2);

        let eager = SessionStore::with_sweep_interval(expired, chrono::Duration::zero());
        eager.create();
        eager.create();
        // each create sweeps the sessions made before it
        assert_eq!(eager.len(), 1);
    }
}
