use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::fishniks::fishnik::{Fishnik, FishnikPatch, NewFishnik};

#[async_trait]
pub trait FishnikRepository: Send + Sync {
    async fn create(&self, new: &NewFishnik) -> anyhow::Result<Fishnik>;

    // Insertion order
    async fn list(&self) -> anyhow::Result<Vec<Fishnik>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>>;

    // Returns the removed record, None if nothing matched
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>>;

    async fn update(&self, id: Uuid, patch: &FishnikPatch) -> anyhow::Result<Option<Fishnik>>;

    async fn count(&self) -> anyhow::Result<i64>;
}
