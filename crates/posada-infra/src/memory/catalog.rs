//! In-memory room catalog.

use std::sync::RwLock;

use posada_core::repository::CatalogStore;
use posada_types::error::StoreError;
use posada_types::room::Room;

/// Room catalog held in memory.
///
/// The engine only reads; the operator sync replaces the whole list.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    rooms: RwLock<Vec<Room>>,
}

impl InMemoryCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// Replace the full room list with a fresh sync.
    pub fn replace(&self, rooms: Vec<Room>) -> Result<(), StoreError> {
        let mut guard = self
            .rooms
            .write()
            .map_err(|_| StoreError::Query("catalog lock poisoned".to_string()))?;
        *guard = rooms;
        Ok(())
    }
}

impl CatalogStore for InMemoryCatalog {
    async fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let guard = self
            .rooms
            .read()
            .map_err(|_| StoreError::Query("catalog lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn room(name: &str) -> Room {
        Room {
            id: Uuid::now_v7(),
            name: name.to_string(),
            room_type: "doble".to_string(),
            capacity: 2,
            rack_rate: 120.0,
            occupancy_rates: vec![],
        }
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_list() {
        let catalog = InMemoryCatalog::new(vec![room("Marina")]);
        catalog.replace(vec![room("Andina"), room("Costera")]).unwrap();

        let rooms = catalog.list_rooms().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Andina");
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let catalog = InMemoryCatalog::default();
        assert!(catalog.list_rooms().await.unwrap().is_empty());
    }
}
