pub mod dbs;
pub mod error;
pub mod extract;
mod handlers;
pub mod middleware;
pub mod service;

use crate::dbs::{Database, DatabaseConfig, DbResult};
use crate::handlers::{
    create_personality, delete_personality, get_personality, home, id_method_not_allowed,
    list_personalities, method_not_allowed, not_found, update_personality,
};
use crate::service::PersonalityService;
use axum::{Router, routing::get};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: PersonalityService,
}

/// Connects to the configured store and builds the full application.
pub async fn init(config: &DatabaseConfig) -> DbResult<Router> {
    let db = dbs::connect(config).await?;
    Ok(app(db))
}

pub fn app(db: Arc<dyn Database>) -> Router {
    let state = AppState {
        service: PersonalityService::new(db),
    };

    let router = Router::new()
        .route("/", get(home).fallback(method_not_allowed))
        .route(
            "/api/personalities",
            get(list_personalities)
                .post(create_personality)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/personalities/{id}",
            get(get_personality)
                .put(update_personality)
                .delete(delete_personality)
                .fallback(id_method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state);

    middleware::apply(router)
}
