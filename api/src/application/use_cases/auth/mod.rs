pub mod authenticate;
pub mod login;
pub mod logout;
pub mod register;

use crate::application::ports::token_codec::{AUTH_ACCESS, TokenCodec};
use crate::application::ports::user_repository::{UserRepository, UserRow};

/// A user together with the token just issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserRow,
    pub token: String,
}

async fn issue_session<R, T>(repo: &R, tokens: &T, user: UserRow) -> anyhow::Result<Session>
where
    R: UserRepository + ?Sized,
    T: TokenCodec + ?Sized,
{
    let token = tokens.issue(user.id, AUTH_ACCESS)?;
    repo.add_token(user.id, &token, AUTH_ACCESS).await?;
    Ok(Session {
        user: UserRow {
            password_hash: None,
            ..user
        },
        token,
    })
}
