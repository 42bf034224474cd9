use uuid::Uuid;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::Fishnik;

pub struct DeleteFishnik<'a, R: FishnikRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FishnikRepository + ?Sized> DeleteFishnik<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        let removed = self.repo.delete(id).await?;
        if removed.is_some() {
            tracing::info!(fishnik_id = %id, "fishnik_deleted");
        }
        Ok(removed)
    }
}
