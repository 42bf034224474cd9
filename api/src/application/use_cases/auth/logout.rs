use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;

pub struct Logout<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> Logout<'a, R> {
    pub async fn execute(&self, user_id: Uuid, token: &str) -> anyhow::Result<bool> {
        self.repo.remove_token(user_id, token).await
    }
}
