use thiserror::Error;

/// Errors from store collaborators (catalog, scripts, training).
///
/// Used by the port traits in posada-core; implementations live in
/// posada-infra.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the direct pricing entry point.
///
/// The conversational router never surfaces these; it turns missing
/// information into a follow-up question instead. Only `quote_query`, the
/// direct entry point, reports them to the caller.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("booking query has no dates")]
    MissingDates,

    #[error("booking query has no guests")]
    MissingGuests,

    #[error("no rooms can host {guests} guests")]
    NoRoomsAvailable { guests: u32 },

    #[error("catalog error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::Query("timeout".to_string());
        assert_eq!(err.to_string(), "query error: timeout");
    }

    #[test]
    fn quote_error_wraps_store_error() {
        let err = QuoteError::from(StoreError::Connection);
        assert!(err.to_string().contains("store connection error"));
    }
}
