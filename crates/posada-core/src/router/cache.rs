//! Response cache port.

use posada_types::response::RouteResponse;

/// Short-lived cache of routed responses.
///
/// Keys are `"{session_id}:{message}"`. Implementations must bound both
/// entry lifetime (TTL, 5 minutes by default) and entry count, evicting
/// the least-recently-set entry at capacity. Implementations live in
/// posada-infra; the router only sees this trait.
pub trait ResponseCache: Send + Sync {
    /// A non-expired entry for the key, if present.
    fn get(&self, key: &str) -> Option<RouteResponse>;

    /// Store a response, evicting the oldest entry when at capacity.
    fn put(&self, key: String, response: RouteResponse);

    /// Drop a single entry.
    fn evict(&self, key: &str);

    /// Number of live entries (expired entries may be counted until
    /// their next access).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
