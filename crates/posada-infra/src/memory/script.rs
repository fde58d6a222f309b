//! In-memory script store.

use std::sync::RwLock;

use posada_core::repository::ScriptStore;
use posada_types::error::StoreError;
use posada_types::script::Script;

/// Operator scripts held in memory, in operator-defined order.
#[derive(Debug, Default)]
pub struct InMemoryScriptStore {
    scripts: RwLock<Vec<Script>>,
}

impl InMemoryScriptStore {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: RwLock::new(scripts),
        }
    }

    /// Replace the full script list with a fresh sync.
    pub fn replace(&self, scripts: Vec<Script>) -> Result<(), StoreError> {
        let mut guard = self
            .scripts
            .write()
            .map_err(|_| StoreError::Query("script lock poisoned".to_string()))?;
        *guard = scripts;
        Ok(())
    }
}

impl ScriptStore for InMemoryScriptStore {
    async fn list_active_scripts(&self) -> Result<Vec<Script>, StoreError> {
        let guard = self
            .scripts
            .read()
            .map_err(|_| StoreError::Query("script lock poisoned".to_string()))?;
        Ok(guard.iter().filter(|s| s.active).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn script(response: &str, active: bool) -> Script {
        Script {
            id: Uuid::now_v7(),
            triggers: vec!["hola".to_string()],
            response: response.to_string(),
            active,
            category: None,
            requires_date: false,
            requires_room_type: false,
            requires_occupancy: false,
        }
    }

    #[tokio::test]
    async fn inactive_scripts_are_filtered_out() {
        let store = InMemoryScriptStore::new(vec![
            script("uno", true),
            script("dos", false),
            script("tres", true),
        ]);

        let active = store.list_active_scripts().await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|s| s.active));
    }

    #[tokio::test]
    async fn operator_order_is_preserved() {
        let store = InMemoryScriptStore::new(vec![script("uno", true), script("dos", true)]);
        let active = store.list_active_scripts().await.unwrap();
        assert_eq!(active[0].response, "uno");
        assert_eq!(active[1].response, "dos");
    }
}
