use crate::dbs::{Database, DbError, DbResult, PersonalityRow, not_found};
use async_trait::async_trait;
use shared::models::{NewPersonality, Personality};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> DbResult<()> {
        // The UNIQUE constraint is the authoritative guard against duplicate names
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS personalities (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL UNIQUE,
                history TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn create_personality(&self, personality: NewPersonality) -> DbResult<Personality> {
        let row = sqlx::query_as::<_, PersonalityRow>(
            "INSERT INTO personalities (name, history) VALUES ($1, $2)
             RETURNING id, name, history, created_at, updated_at",
        )
        .bind(&personality.name)
        .bind(&personality.history)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &personality.name))?;

        row.try_into()
    }

    async fn get_personalities(&self) -> DbResult<Vec<Personality>> {
        let rows = sqlx::query_as::<_, PersonalityRow>(
            "SELECT id, name, history, created_at, updated_at FROM personalities ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Personality::try_from).collect()
    }

    async fn get_personality(&self, personality_id: u32) -> DbResult<Personality> {
        let row = sqlx::query_as::<_, PersonalityRow>(
            "SELECT id, name, history, created_at, updated_at FROM personalities WHERE id = $1",
        )
        .bind(i64::from(personality_id))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(not_found(personality_id)),
        }
    }

    async fn update_personality(&self, personality: &Personality) -> DbResult<Personality> {
        let row = sqlx::query_as::<_, PersonalityRow>(
            "UPDATE personalities SET name = $1, history = $2, updated_at = now() WHERE id = $3
             RETURNING id, name, history, created_at, updated_at",
        )
        .bind(&personality.name)
        .bind(&personality.history)
        .bind(i64::from(personality.id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &personality.name))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(not_found(personality.id)),
        }
    }

    async fn delete_personality(&self, personality_id: u32) -> DbResult<()> {
        sqlx::query("DELETE FROM personalities WHERE id = $1")
            .bind(i64::from(personality_id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn personality_name_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM personalities WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
