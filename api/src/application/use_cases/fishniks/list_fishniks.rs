use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::Fishnik;

pub struct ListFishniks<'a, R: FishnikRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FishnikRepository + ?Sized> ListFishniks<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Fishnik>> {
        self.repo.list().await
    }
}
