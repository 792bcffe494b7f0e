use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{NewPersonality, Personality};
use std::sync::Arc;
use thiserror::Error;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresDatabase;
pub use sqlite::SqliteDatabase;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseConfig {
    Local { url: String },
    Postgres { url: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DbError {
    /// Classifies a failed write, surfacing the store's unique constraint as
    /// its own variant.
    pub(crate) fn from_write(err: sqlx::Error, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(format!("Personality named {name:?} already exists"))
            }
            _ => DbError::Sqlx(err),
        }
    }
}

#[async_trait]
pub trait Database: Send + Sync {
    async fn create_personality(&self, personality: NewPersonality) -> DbResult<Personality>;
    /// All records, ascending by id.
    async fn get_personalities(&self) -> DbResult<Vec<Personality>>;
    async fn get_personality(&self, personality_id: u32) -> DbResult<Personality>;
    /// Saves name and history of an existing record and refreshes its
    /// modification timestamp.
    async fn update_personality(&self, personality: &Personality) -> DbResult<Personality>;
    async fn delete_personality(&self, personality_id: u32) -> DbResult<()>;
    async fn personality_name_exists(&self, name: &str) -> DbResult<bool>;
}

pub async fn connect(config: &DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match config {
        DatabaseConfig::Local { url } => {
            tracing::info!("Using local SQLite database");
            Arc::new(SqliteDatabase::new(url).await?)
        }
        DatabaseConfig::Postgres { url } => {
            tracing::info!("Using PostgreSQL database");
            Arc::new(PostgresDatabase::new(url).await?)
        }
    };
    Ok(db)
}

#[derive(sqlx::FromRow)]
pub(crate) struct PersonalityRow {
    id: i64,
    name: String,
    history: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PersonalityRow> for Personality {
    type Error = DbError;

    fn try_from(row: PersonalityRow) -> DbResult<Self> {
        let id = u32::try_from(row.id)
            .map_err(|_| DbError::Internal(format!("Personality id {} out of range", row.id)))?;
        Ok(Personality {
            id,
            name: row.name,
            history: row.history,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn not_found(personality_id: u32) -> DbError {
    DbError::NotFound(format!("Personality {} not found", personality_id))
}
