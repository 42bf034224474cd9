use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 10;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections = MAX_CONNECTIONS, "db_pool_connected");
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // users, user_tokens, fishniks
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
