use uuid::Uuid;

/// Access tag carried by session tokens issued at signup and login.
pub const AUTH_ACCESS: &str = "auth";

pub trait TokenCodec: Send + Sync {
    /// Mint a fresh token for `user_id`. Two calls never return the same token.
    fn issue(&self, user_id: Uuid, access: &str) -> anyhow::Result<String>;

    /// Check signature and access tag, returning the user id the token was minted for.
    fn verify(&self, token: &str, access: &str) -> anyhow::Result<Uuid>;
}
