use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{NewUser, UserRepository, UserRow};
use crate::infrastructure::crypto::token_digest;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: PgRow) -> UserRow {
    UserRow {
        id: r.get("id"),
        email: r.get("email"),
        password_hash: r.try_get("password_hash").ok(),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        user: NewUser<'_>,
        token: &str,
        access: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)
               ON CONFLICT (email) DO NOTHING
               RETURNING id, email, password_hash"#,
        )
        .bind(user.id)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        sqlx::query(r#"INSERT INTO user_tokens (token_hash, user_id, access) VALUES ($1, $2, $3)"#)
            .bind(token_digest(token))
            .bind(user.id)
            .bind(access)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(map_user(row)))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(r#"SELECT id, email, password_hash FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_user))
    }

    async fn add_token(&self, user_id: Uuid, token: &str, access: &str) -> anyhow::Result<()> {
        sqlx::query(r#"INSERT INTO user_tokens (token_hash, user_id, access) VALUES ($1, $2, $3)"#)
            .bind(token_digest(token))
            .bind(user_id)
            .bind(access)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str, access: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT u.id, u.email
               FROM user_tokens t
               JOIN users u ON u.id = t.user_id
               WHERE t.token_hash = $1 AND t.access = $2"#,
        )
        .bind(token_digest(token))
        .bind(access)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| UserRow {
            id: r.get("id"),
            email: r.get("email"),
            password_hash: None,
        }))
    }

    async fn remove_token(&self, user_id: Uuid, token: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM user_tokens WHERE token_hash = $1 AND user_id = $2")
            .bind(token_digest(token))
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_tokens(&self, user_id: Uuid) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
