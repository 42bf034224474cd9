use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::application::ports::token_codec::{AUTH_ACCESS, TokenCodec};
use crate::application::ports::user_repository::{NewUser, UserRepository, UserRow};
use crate::application::use_cases::auth::Session;
use crate::domain::users::credentials::Credentials;

pub struct Register<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    pub repo: &'a R,
    pub tokens: &'a T,
}

impl<'a, R, T> Register<'a, R, T>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    /// Returns None when the email is already registered.
    pub async fn execute(&self, creds: &Credentials) -> anyhow::Result<Option<Session>> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(creds.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let new_user = NewUser {
            id: Uuid::new_v4(),
            email: &creds.email,
            password_hash: &hash,
        };
        let token = self.tokens.issue(new_user.id, AUTH_ACCESS)?;
        let Some(user) = self
            .repo
            .create_user(new_user, &token, AUTH_ACCESS)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(Session {
            user: UserRow {
                password_hash: None,
                ..user
            },
            token,
        }))
    }
}
