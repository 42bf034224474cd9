use uuid::Uuid;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::Fishnik;

pub struct GetFishnik<'a, R: FishnikRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FishnikRepository + ?Sized> GetFishnik<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        self.repo.get_by_id(id).await
    }
}
