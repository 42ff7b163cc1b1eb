use axum::extract::{Path, State};
use axum::response::Json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::state::AppState;

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<User>> {
    Ok(Json(state.store.get_user(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> AppResult<Json<User>> {
    if new.name.trim().is_empty() || new.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Name and email must not be empty".into(),
        ));
    }

    let user = state.store.create_user(new).await?;
    info!(id = %user.id, "Registered user");
    Ok(Json(user))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = state.store.update_user(&id, update).await?;
    info!(id = %id, "Updated user profile");
    Ok(Json(user))
}
