use crate::dbs::{Database, DbError, DbResult, PersonalityRow, not_found};
use async_trait::async_trait;
use shared::models::{NewPersonality, Personality};
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};

/// Embedded store used for local runs and tests.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    /// Accepts any sqlx SQLite URL, e.g. `sqlite://personalities.db?mode=rwc`
    /// or `sqlite::memory:`.
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let options = if is_in_memory(database_url) {
            // Every in-memory connection is its own database, so keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = options.connect(database_url).await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    pub async fn in_memory() -> DbResult<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn init(&self) -> DbResult<()> {
        // AUTOINCREMENT keeps ids from being reused after deletes
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS personalities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                history TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// True for both `sqlite::memory:` and named `?mode=memory` URLs.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn create_personality(&self, personality: NewPersonality) -> DbResult<Personality> {
        let row = sqlx::query_as::<_, PersonalityRow>(
            "INSERT INTO personalities (name, history) VALUES (?, ?)
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
            "SELECT id, name, history, created_at, updated_at FROM personalities WHERE id = ?",
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
            "UPDATE personalities
             SET name = ?, history = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?
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
        sqlx::query("DELETE FROM personalities WHERE id = ?")
            .bind(i64::from(personality_id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn personality_name_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM personalities WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
