use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::{Fishnik, FishnikPatch, NewFishnik};

/// Process-local fishnik store; a Vec keeps insertion order for listings.
#[derive(Debug, Default)]
pub struct MemoryFishnikRepository {
    items: RwLock<Vec<Fishnik>>,
}

impl MemoryFishnikRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FishnikRepository for MemoryFishnikRepository {
    async fn create(&self, new: &NewFishnik) -> anyhow::Result<Fishnik> {
        let now = chrono::Utc::now();
        let fishnik = Fishnik {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            year: new.year,
            orientation: new.orientation,
            created_at: now,
            updated_at: now,
        };
        self.items.write().await.push(fishnik.clone());
        Ok(fishnik)
    }

    async fn list(&self) -> anyhow::Result<Vec<Fishnik>> {
        Ok(self.items.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|f| f.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        let mut items = self.items.write().await;
        let idx = items.iter().position(|f| f.id == id);
        Ok(idx.map(|idx| items.remove(idx)))
    }

    async fn update(&self, id: Uuid, patch: &FishnikPatch) -> anyhow::Result<Option<Fishnik>> {
        let mut items = self.items.write().await;
        let Some(fishnik) = items.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        patch.apply(fishnik);
        fishnik.updated_at = chrono::Utc::now();
        Ok(Some(fishnik.clone()))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.items.read().await.len() as i64)
    }
}
