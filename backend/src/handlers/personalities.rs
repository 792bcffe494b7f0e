use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{JsonBody, PathId};
use axum::{Json, extract::State, http::StatusCode};
use shared::models::{CreatePersonalityRequest, PersonalityResponse, UpdatePersonalityRequest};
use shared::validation::Validate;

pub async fn list_personalities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PersonalityResponse>>> {
    let personalities = state.service.get_all().await?;
    Ok(Json(personalities))
}

pub async fn get_personality(
    State(state): State<AppState>,
    PathId(personality_id): PathId,
) -> ApiResult<Json<PersonalityResponse>> {
    let personality = state.service.get_by_id(personality_id).await?;
    Ok(Json(personality))
}

pub async fn create_personality(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePersonalityRequest>,
) -> ApiResult<(StatusCode, Json<PersonalityResponse>)> {
    payload.validate()?;
    let personality = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(personality)))
}

pub async fn update_personality(
    State(state): State<AppState>,
    PathId(personality_id): PathId,
    JsonBody(payload): JsonBody<UpdatePersonalityRequest>,
) -> ApiResult<Json<PersonalityResponse>> {
    payload.validate()?;
    let personality = state.service.update(personality_id, payload).await?;
    Ok(Json(personality))
}

pub async fn delete_personality(
    State(state): State<AppState>,
    PathId(personality_id): PathId,
) -> ApiResult<StatusCode> {
    state.service.delete(personality_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
