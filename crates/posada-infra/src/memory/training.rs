//! In-memory training corpus store.

use std::sync::RwLock;

use posada_core::repository::TrainingStore;
use posada_types::error::StoreError;
use posada_types::training::TrainingCorpus;

/// Completed training corpora held in memory.
///
/// The router only ever reads the most recently completed one; older
/// corpora are kept so a rollback is a deletion, not a re-train.
#[derive(Debug, Default)]
pub struct InMemoryTrainingStore {
    corpora: RwLock<Vec<TrainingCorpus>>,
}

impl InMemoryTrainingStore {
    pub fn new(corpora: Vec<TrainingCorpus>) -> Self {
        Self {
            corpora: RwLock::new(corpora),
        }
    }

    /// Add a freshly completed corpus.
    pub fn push(&self, corpus: TrainingCorpus) -> Result<(), StoreError> {
        let mut guard = self
            .corpora
            .write()
            .map_err(|_| StoreError::Query("training lock poisoned".to_string()))?;
        guard.push(corpus);
        Ok(())
    }
}

impl TrainingStore for InMemoryTrainingStore {
    async fn latest_completed_corpus(&self) -> Result<Option<TrainingCorpus>, StoreError> {
        let guard = self
            .corpora
            .read()
            .map_err(|_| StoreError::Query("training lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .max_by_key(|c| c.completed_at)
            .cloned())
    }
}
