//! Store port traits.
//!
//! The engine reads rooms, scripts, and training corpora through these
//! traits; implementations live in posada-infra. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use posada_types::error::StoreError;
use posada_types::room::Room;
use posada_types::script::Script;
use posada_types::training::TrainingCorpus;

/// Read access to the room catalog. Rooms are read-only to the engine.
pub trait CatalogStore: Send + Sync {
    fn list_rooms(&self)
    -> impl std::future::Future<Output = Result<Vec<Room>, StoreError>> + Send;
}

/// Read access to operator scripts.
pub trait ScriptStore: Send + Sync {
    /// Scripts with `active = true`, in operator-defined order.
    fn list_active_scripts(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Script>, StoreError>> + Send;
}

/// Read access to training corpora.
pub trait TrainingStore: Send + Sync {
    /// The most recently completed corpus, if any exists yet.
    fn latest_completed_corpus(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<TrainingCorpus>, StoreError>> + Send;
}
