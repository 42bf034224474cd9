use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::{Fishnik, NewFishnik};

pub struct CreateFishnik<'a, R: FishnikRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FishnikRepository + ?Sized> CreateFishnik<'a, R> {
    pub async fn execute(&self, new: &NewFishnik) -> anyhow::Result<Fishnik> {
        self.repo.create(new).await
    }
}
