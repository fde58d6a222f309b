//! Conversation context port.

use posada_types::booking::BookingQuery;
use posada_types::llm::ChatMessage;

/// Per-session conversation state: the bounded message history fed to the
/// generation provider, and the booking query under construction.
///
/// Implementations must create state lazily on first access, cap the
/// history at `context_window * 2` messages with FIFO trimming, and keep
/// everything in memory for the session's lifetime. `evict` is the
/// explicit lifecycle hook for transports that know when a session ended;
/// the router never calls it on its own.
pub trait ConversationStore: Send + Sync {
    /// The session's message history, oldest first. Empty for a new session.
    fn history(&self, session_id: &str) -> Vec<ChatMessage>;

    /// Append a user/assistant exchange, trimming from the front once the
    /// history exceeds the window.
    fn record_exchange(&self, session_id: &str, user_message: &str, assistant_message: &str);

    /// The booking query accumulated so far. Default for a new session.
    fn pending_query(&self, session_id: &str) -> BookingQuery;

    /// Replace the accumulated booking query.
    fn store_pending(&self, session_id: &str, query: BookingQuery);

    /// Drop all state for a session.
    fn evict(&self, session_id: &str);
}
