use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
}

/// A user about to be registered, id chosen by the caller so a token can be signed first.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Token arguments are raw tokens; adapters decide how they are stored.
#[async_trait]
pub trait UserRepository: Send + Sync {
    // Stores the user and its first token together, or neither.
    // Returns None when the email is already taken
    async fn create_user(
        &self,
        user: NewUser<'_>,
        token: &str,
        access: &str,
    ) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>>;

    async fn add_token(&self, user_id: Uuid, token: &str, access: &str) -> anyhow::Result<()>;
    async fn find_by_token(&self, token: &str, access: &str) -> anyhow::Result<Option<UserRow>>;
    async fn remove_token(&self, user_id: Uuid, token: &str) -> anyhow::Result<bool>;
    async fn count_tokens(&self, user_id: Uuid) -> anyhow::Result<i64>;
}
