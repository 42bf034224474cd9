use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::fishnik_repository::FishnikRepository;
use crate::domain::fishniks::fishnik::{Fishnik, FishnikPatch, NewFishnik};
use crate::infrastructure::db::PgPool;

pub struct SqlxFishnikRepository {
    pub pool: PgPool,
}

impl SqlxFishnikRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_fishnik(r: PgRow) -> Fishnik {
    Fishnik {
        id: r.get("id"),
        name: r.get("name"),
        year: r.get("year"),
        orientation: r.get("orientation"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl FishnikRepository for SqlxFishnikRepository {
    async fn create(&self, new: &NewFishnik) -> anyhow::Result<Fishnik> {
        let row = sqlx::query(
            r#"INSERT INTO fishniks (id, name, year, orientation) VALUES ($1, $2, $3, $4)
               RETURNING id, name, year, orientation, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(new.year)
        .bind(new.orientation)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_fishnik(row))
    }

    async fn list(&self) -> anyhow::Result<Vec<Fishnik>> {
        let rows = sqlx::query(
            r#"SELECT id, name, year, orientation, created_at, updated_at
               FROM fishniks ORDER BY seq"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_fishnik).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        let row = sqlx::query(
            r#"SELECT id, name, year, orientation, created_at, updated_at
               FROM fishniks WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_fishnik))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        let row = sqlx::query(
            r#"DELETE FROM fishniks WHERE id = $1
               RETURNING id, name, year, orientation, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_fishnik))
    }

    async fn update(&self, id: Uuid, patch: &FishnikPatch) -> anyhow::Result<Option<Fishnik>> {
        // year: $3 says whether to write, $4 is the value (possibly NULL)
        let row = sqlx::query(
            r#"UPDATE fishniks SET
                 name = COALESCE($2, name),
                 year = CASE WHEN $3 THEN $4 ELSE year END,
                 orientation = COALESCE($5, orientation),
                 updated_at = now()
               WHERE id = $1
               RETURNING id, name, year, orientation, created_at, updated_at"#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.year.is_some())
        .bind(patch.year.flatten())
        .bind(patch.orientation)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_fishnik))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fishniks")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
