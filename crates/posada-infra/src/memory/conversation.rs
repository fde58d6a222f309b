//! In-memory conversation contexts.

use dashmap::DashMap;

use posada_core::router::ConversationStore;
use posada_types::booking::BookingQuery;
use posada_types::llm::ChatMessage;

#[derive(Default)]
struct SessionState {
    history: Vec<ChatMessage>,
    pending: BookingQuery,
}

/// Per-session conversation state held in a concurrent map.
///
/// Sessions are created lazily on first write and live until `evict`. The
/// history is capped at `context_window * 2` messages (one exchange is two
/// messages), trimming from the front.
pub struct InMemoryConversationStore {
    sessions: DashMap<String, SessionState>,
    context_window: usize,
}

impl InMemoryConversationStore {
    pub fn new(context_window: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            context_window,
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions
            .get(session_id)
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }

    fn record_exchange(&self, session_id: &str, user_message: &str, assistant_message: &str) {
        let mut state = self.sessions.entry(session_id.to_string()).or_default();
        state.history.push(ChatMessage::user(user_message));
        state.history.push(ChatMessage::assistant(assistant_message));

        let cap = self.context_window * 2;
        let len = state.history.len();
        if len > cap {
            state.history.drain(0..len - cap);
        }
    }

    fn pending_query(&self, session_id: &str) -> BookingQuery {
        self.sessions
            .get(session_id)
            .map(|s| s.pending.clone())
            .unwrap_or_default()
    }

    fn store_pending(&self, session_id: &str, query: BookingQuery) {
        self.sessions.entry(session_id.to_string()).or_default().pending = query;
    }

    fn evict(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posada_types::booking::Guest;

    #[test]
    fn unknown_session_has_empty_state() {
        let store = InMemoryConversationStore::new(10);
        assert!(store.history("nadie").is_empty());
        assert_eq!(store.pending_query("nadie"), BookingQuery::default());
        // reads never create sessions
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn history_trims_oldest_exchanges() {
        let store = InMemoryConversationStore::new(2);
        for i in 0..5 {
            store.record_exchange("s1", &format!("pregunta {i}"), &format!("respuesta {i}"));
        }

        let history = store.history("s1");
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "pregunta 3");
        assert_eq!(history[3].content, "respuesta 4");
    }

    #[test]
    fn pending_query_round_trips() {
        let store = InMemoryConversationStore::new(10);
        let query = BookingQuery {
            guests: vec![Guest::adult(), Guest::adult()],
            ..Default::default()
        };
        store.store_pending("s1", query.clone());
        assert_eq!(store.pending_query("s1"), query);
    }

    #[test]
    fn evict_drops_all_session_state() {
        let store = InMemoryConversationStore::new(10);
        store.record_exchange("s1", "hola", "buenas");
        store.store_pending("s1", BookingQuery::default());
        store.evict("s1");

        assert!(store.history("s1").is_empty());
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = InMemoryConversationStore::new(10);
        store.record_exchange("s1", "hola", "buenas");
        assert!(store.history("s2").is_empty());
    }
}
