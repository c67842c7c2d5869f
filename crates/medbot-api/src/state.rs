//! Shared application state for the chat backend.
//!
//! `AppState` holds the reply service and the per-session conversation
//! histories, shared across all axum handlers. Histories are bounded: idle
//! ones are swept periodically and the least recently used one is dropped
//! when `server.max_sessions` is reached.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use medbot_core::chat::answer::AnswerCleaner;
use medbot_core::chat::history::ConversationHistory;
use medbot_core::chat::reply::{ReplyService, ReplySettings};
use medbot_core::llm::box_provider::BoxLlmProvider;
use medbot_infra::llm::create_provider;
use medbot_infra::secret::EnvSecretProvider;
use medbot_infra::vector::open_retriever;
use medbot_types::config::MedbotConfig;

/// One conversation and when it was last touched.
pub struct SessionEntry {
    history: Arc<Mutex<ConversationHistory>>,
    last_used: Instant,
}

fn reply_service(config: &MedbotConfig, provider: BoxLlmProvider) -> ReplyService {
    ReplyService::new(
        provider,
        AnswerCleaner::from(&config.answer),
        ReplySettings::from(&config.llm),
    )
}

/// Shared state for the HTTP backend.
#[derive(Clone)]
pub struct AppState {
    pub reply_service: Arc<ReplyService>,
    /// Conversation histories keyed by session cookie value.
    pub sessions: Arc<DashMap<String, SessionEntry>>,
    pub config: Arc<MedbotConfig>,
}

impl AppState {
    /// Build the state, reading the API key from the configured env var and
    /// opening the document index under `data_dir` when one exists.
    pub async fn init(config: MedbotConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let key_var = config.llm.api_key_env.clone();
        let api_key = EnvSecretProvider::new().get(&key_var);
        let provider = create_provider(&config.llm, api_key).map_err(|e| {
            anyhow::anyhow!("{e}: {key_var} not set. Export it before running `medbot serve`")
        })?;

        tracing::info!(
            provider = provider.name(),
            model = %config.llm.model,
            "LLM provider ready"
        );

        let retriever = match open_retriever(&config.retrieval, data_dir).await {
            Ok(retriever) => retriever,
            Err(e) => {
                tracing::warn!(error = %e, "document index unavailable, answering without context");
                None
            }
        };

        let mut reply_service = reply_service(&config, provider);
        if let Some(retriever) = retriever {
            reply_service = reply_service.with_retriever(retriever, config.retrieval.top_k);
        }
        Ok(Self::with_service(config, reply_service))
    }

    /// Build the state around an already constructed provider.
    pub fn with_provider(config: MedbotConfig, provider: BoxLlmProvider) -> Self {
        let reply_service = reply_service(&config, provider);
        Self::with_service(config, reply_service)
    }

    /// Build the state around a fully configured reply service.
    pub fn with_service(config: MedbotConfig, reply_service: ReplyService) -> Self {
        Self {
            reply_service: Arc::new(reply_service),
            sessions: Arc::new(DashMap::new()),
            config: Arc::new(config),
        }
    }

    /// History for `session_id`, created empty on first use.
    pub fn history(&self, session_id: &str) -> Arc<Mutex<ConversationHistory>> {
        self.history_at(session_id, Instant::now())
    }

    fn history_at(&self, session_id: &str, now: Instant) -> Arc<Mutex<ConversationHistory>> {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.last_used = now;
            return Arc::clone(&entry.history);
        }

        self.make_room(now);
        let limit = self.config.server.history_limit;
        let entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                history: Arc::new(Mutex::new(ConversationHistory::new(limit))),
                last_used: now,
            });
        Arc::clone(&entry.history)
    }

    /// Drop idle sessions, then the least recently used ones until a new
    /// session fits under `server.max_sessions`.
    fn make_room(&self, now: Instant) {
        let max = self.config.server.max_sessions.max(1);
        if self.sessions.len() < max {
            return;
        }
        self.evict_idle(now);

        while self.sessions.len() >= max {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.last_used)
                .map(|entry| entry.key().clone());
            let Some(key) = oldest else { break };
            self.sessions.remove(&key);
            tracing::debug!(session = %key, "session limit reached, dropped least recently used");
        }
    }

    /// Remove sessions unused for `server.session_idle_secs`; returns how many.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let idle = Duration::from_secs(self.config.server.session_idle_secs);
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.saturating_duration_since(entry.last_used) < idle);
        before.saturating_sub(self.sessions.len())
    }

    /// Sweep idle sessions every `server.session_sweep_secs` until aborted.
    pub fn spawn_session_sweeper(&self) -> JoinHandle<()> {
        let state = self.clone();
        let period = Duration::from_secs(self.config.server.session_sweep_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let evicted = state.evict_idle(Instant::now());
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = state.sessions.len(), "idle sessions swept");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use medbot_core::llm::provider::LlmProvider;
    use medbot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

    use super::*;

    struct Unused;

    impl LlmProvider for Unused {
        fn name(&self) -> &str {
            "unused"
        }

        async fn complete(&self, _: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            Err(LlmError::InvalidRequest("not expected".to_string()))
        }
    }

    fn state(idle_secs: u64, max_sessions: usize) -> AppState {
        let mut config = MedbotConfig::default();
        config.server.session_idle_secs = idle_secs;
        config.server.max_sessions = max_sessions;
        AppState::with_provider(config, BoxLlmProvider::new(Unused))
    }

    #[tokio::test]
    async fn test_same_session_shares_history() {
        let state = state(60, 10);
        let t0 = Instant::now();

        state.history_at("a", t0).lock().await.push_user("hello");
        let again = state.history_at("a", t0 + Duration::from_secs(1));
        assert_eq!(again.lock().await.len(), 1);
        assert_eq!(state.sessions.len(), 1);
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let state = state(60, 10);
        let t0 = Instant::now();
        state.history_at("old", t0);
        state.history_at("recent", t0 + Duration::from_secs(50));
        // Touching keeps a session alive.
        state.history_at("touched", t0);
        state.history_at("touched", t0 + Duration::from_secs(40));

        let evicted = state.evict_idle(t0 + Duration::from_secs(70));
        assert_eq!(evicted, 1);
        assert!(!state.sessions.contains_key("old"));
        assert!(state.sessions.contains_key("recent"));
        assert!(state.sessions.contains_key("touched"));
    }

    #[test]
    fn test_session_cap_drops_least_recently_used() {
        let state = state(3600, 3);
        let t0 = Instant::now();
        let at = |secs| t0 + Duration::from_secs(secs);

        state.history_at("a", at(0));
        state.history_at("b", at(1));
        state.history_at("c", at(2));
        state.history_at("a", at(3));
        state.history_at("d", at(4));

        assert_eq!(state.sessions.len(), 3);
        assert!(!state.sessions.contains_key("b"));
        for key in ["a", "c", "d"] {
            assert!(state.sessions.contains_key(key));
        }
    }

    #[test]
    fn test_cap_prefers_evicting_idle_sessions() {
        let state = state(60, 2);
        let t0 = Instant::now();
        state.history_at("stale", t0);
        state.history_at("live", t0 + Duration::from_secs(100));
        state.history_at("new", t0 + Duration::from_secs(110));

        assert_eq!(state.sessions.len(), 2);
        assert!(state.sessions.contains_key("live"));
        assert!(state.sessions.contains_key("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_periodically() {
        let mut config = MedbotConfig::default();
        config.server.session_idle_secs = 0;
        config.server.session_sweep_secs = 5;
        let state = AppState::with_provider(config, BoxLlmProvider::new(Unused));
        state.history("gone-soon");

        let sweeper = state.spawn_session_sweeper();
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(state.sessions.is_empty());
        sweeper.abort();
    }
}
