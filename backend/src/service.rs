use crate::dbs::{Database, DbError};
use shared::models::{
    CreatePersonalityRequest, NewPersonality, PersonalityResponse, UpdatePersonalityRequest,
};
use std::sync::Arc;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid id")]
    InvalidId,
    #[error("Personality {0} not found")]
    NotFound(u32),
    #[error("A personality named {0:?} already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Internal(DbError),
}

impl ServiceError {
    /// Lookup failures: a missing row is the only expected outcome.
    fn from_lookup(err: DbError, personality_id: u32) -> Self {
        match err {
            DbError::NotFound(_) => ServiceError::NotFound(personality_id),
            other => ServiceError::Internal(other),
        }
    }

    /// Write failures: the row may have vanished or the name may collide.
    fn from_write(err: DbError, personality_id: u32, name: &str) -> Self {
        match err {
            DbError::NotFound(_) => ServiceError::NotFound(personality_id),
            DbError::UniqueViolation(_) => ServiceError::AlreadyExists(name.to_string()),
            other => ServiceError::Internal(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        ServiceError::Internal(err)
    }
}

/// Business rules over the personality store: name uniqueness, partial
/// updates and id checks.
#[derive(Clone)]
pub struct PersonalityService {
    db: Arc<dyn Database>,
}

impl PersonalityService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, request: CreatePersonalityRequest) -> ServiceResult<PersonalityResponse> {
        if self.db.personality_name_exists(&request.name).await? {
            return Err(ServiceError::AlreadyExists(request.name));
        }

        let name = request.name.clone();
        let personality = self
            .db
            .create_personality(NewPersonality {
                name: request.name,
                history: request.history,
            })
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation(_) => ServiceError::AlreadyExists(name),
                other => ServiceError::Internal(other),
            })?;

        tracing::info!("Created personality {}", personality.id);
        Ok(personality.into())
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<PersonalityResponse>> {
        let mut personalities = self.db.get_personalities().await?;
        personalities.sort_by_key(|p| p.id);
        Ok(personalities.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, personality_id: u32) -> ServiceResult<PersonalityResponse> {
        if personality_id == 0 {
            return Err(ServiceError::InvalidId);
        }
        let personality = self
            .db
            .get_personality(personality_id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, personality_id))?;
        Ok(personality.into())
    }

    pub async fn update(
        &self,
        personality_id: u32,
        request: UpdatePersonalityRequest,
    ) -> ServiceResult<PersonalityResponse> {
        if personality_id == 0 {
            return Err(ServiceError::InvalidId);
        }
        let mut personality = self
            .db
            .get_personality(personality_id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, personality_id))?;

        if let Some(name) = request.name()
            && name != personality.name
        {
            if self.db.personality_name_exists(name).await? {
                return Err(ServiceError::AlreadyExists(name.to_string()));
            }
            personality.name = name.to_string();
        }
        if let Some(history) = request.history() {
            personality.history = history.to_string();
        }

        let personality = self
            .db
            .update_personality(&personality)
            .await
            .map_err(|e| ServiceError::from_write(e, personality_id, &personality.name))?;

        tracing::info!("Updated personality {}", personality_id);
        Ok(personality.into())
    }

    pub async fn delete(&self, personality_id: u32) -> ServiceResult<()> {
        if personality_id == 0 {
            return Err(ServiceError::InvalidId);
        }
        self.db
            .get_personality(personality_id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, personality_id))?;

        self.db.delete_personality(personality_id).await?;
        tracing::info!("Deleted personality {}", personality_id);
        Ok(())
    }
}
