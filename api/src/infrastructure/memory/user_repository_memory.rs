use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::user_repository::{NewUser, UserRepository, UserRow};
use crate::infrastructure::crypto::token_digest;

#[derive(Debug, Clone)]
struct StoredToken {
    user_id: Uuid,
    access: String,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserRow>,
    by_email: HashMap<String, Uuid>,
    // token digest -> owner
    tokens: HashMap<String, StoredToken>,
}

/// Process-local user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    state: RwLock<State>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn public_row(row: &UserRow) -> UserRow {
    UserRow {
        id: row.id,
        email: row.email.clone(),
        password_hash: None,
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(
        &self,
        user: NewUser<'_>,
        token: &str,
        access: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut state = self.state.write().await;
        if state.by_email.contains_key(user.email) {
            return Ok(None);
        }
        let digest = token_digest(token);
        anyhow::ensure!(!state.tokens.contains_key(&digest), "token already issued");
        let row = UserRow {
            id: user.id,
            email: user.email.to_string(),
            password_hash: Some(user.password_hash.to_string()),
        };
        state.by_email.insert(row.email.clone(), row.id);
        state.users.insert(row.id, row.clone());
        state.tokens.insert(
            digest,
            StoredToken {
                user_id: row.id,
                access: access.to_string(),
            },
        );
        Ok(Some(row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn add_token(&self, user_id: Uuid, token: &str, access: &str) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        anyhow::ensure!(state.users.contains_key(&user_id), "user not found");
        let digest = token_digest(token);
        anyhow::ensure!(!state.tokens.contains_key(&digest), "token already issued");
        state.tokens.insert(
            digest,
            StoredToken {
                user_id,
                access: access.to_string(),
            },
        );
        Ok(())
    }

    async fn find_by_token(&self, token: &str, access: &str) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .get(&token_digest(token))
            .filter(|t| t.access == access)
            .and_then(|t| state.users.get(&t.user_id))
            .map(public_row))
    }

    async fn remove_token(&self, user_id: Uuid, token: &str) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        let digest = token_digest(token);
        match state.tokens.get(&digest) {
            Some(t) if t.user_id == user_id => {
                state.tokens.remove(&digest);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_tokens(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .count() as i64)
    }
}
