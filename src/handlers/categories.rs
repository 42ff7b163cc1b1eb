use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.store.list_categories(&owner_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.store.get_category(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewCategory>,
) -> AppResult<Json<Category>> {
    if new.name.trim().is_empty() {
        return Err(AppError::Validation("Category name must not be empty".into()));
    }

    let category = state.store.create_category(new).await?;
    info!(id = %category.id, name = %category.name, "Created category");
    Ok(Json(category))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("Category name must not be empty".into()));
    }

    let category = state.store.update_category(&id, update).await?;
    info!(id = %id, "Updated category");
    Ok(Json(category))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.store.delete_category(&id).await?;
    info!(id = %id, "Deleted category");
    Ok(StatusCode::NO_CONTENT)
}
