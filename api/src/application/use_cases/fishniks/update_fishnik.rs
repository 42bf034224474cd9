use uuid::Uuid;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::{Fishnik, FishnikPatch};

pub struct UpdateFishnik<'a, R: FishnikRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FishnikRepository + ?Sized> UpdateFishnik<'a, R> {
    pub async fn execute(&self, id: Uuid, patch: &FishnikPatch) -> anyhow::Result<Option<Fishnik>> {
        // Nothing to write; answer with the current state
        if patch.is_empty() {
            return self.repo.get_by_id(id).await;
        }
        self.repo.update(id, patch).await
    }
}
