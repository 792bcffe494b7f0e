use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted biography record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub id: u32,
    pub name: String,
    pub history: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when inserting a record. The store assigns
/// the id and both timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPersonality {
    pub name: String,
    pub history: String,
}

// Request payloads
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CreatePersonalityRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub history: String,
}

/// Partial update. Omitted, `null` and empty fields are left untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdatePersonalityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}

impl UpdatePersonalityRequest {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn history(&self) -> Option<&str> {
        self.history.as_deref().filter(|history| !history.is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonalityResponse {
    pub id: u32,
    pub name: String,
    pub history: String,
}

impl From<Personality> for PersonalityResponse {
    fn from(personality: Personality) -> Self {
        Self {
            id: personality.id,
            name: personality.name,
            history: personality.history,
        }
    }
}
