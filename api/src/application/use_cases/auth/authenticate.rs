use crate::application::ports::token_codec::TokenCodec;
use crate::application::ports::user_repository::{UserRepository, UserRow};

/// Resolves a presented token to the user whose token list holds it.
pub struct Authenticate<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    pub repo: &'a R,
    pub tokens: &'a T,
}

impl<'a, R, T> Authenticate<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    pub async fn execute(&self, token: &str, access: &str) -> anyhow::Result<Option<UserRow>> {
        let Ok(user_id) = self.tokens.verify(token, access) else {
            return Ok(None);
        };
        let row = self.repo.find_by_token(token, access).await?;
        Ok(row
            .filter(|u| u.id == user_id)
            .map(|u| UserRow {
                password_hash: None,
                ..u
            }))
    }
}
