use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::token_codec::TokenCodec;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::{Session, issue_session};

pub struct Login<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    pub repo: &'a R,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R, T> Login<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    /// Returns None on unknown email or wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<Session>> {
        let row = match self.repo.find_by_email(req.email.trim()).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }
        let session = issue_session(self.repo, self.tokens, row).await?;
        Ok(Some(session))
    }
}
