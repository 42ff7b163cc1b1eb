use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{CategoryBudget, NewCategoryBudget, UpdateCategoryBudget};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<Vec<CategoryBudget>>> {
    Ok(Json(state.store.list_budgets(&owner_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryBudget>> {
    Ok(Json(state.store.get_budget(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewCategoryBudget>,
) -> AppResult<Json<CategoryBudget>> {
    if new.amount_cents < 0 {
        return Err(AppError::Validation(
            "Budget amount must not be negative".into(),
        ));
    }

    let budget = state.store.create_budget(new).await?;
    info!(id = %budget.id, category_id = %budget.category_id, "Created budget");
    Ok(Json(budget))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateCategoryBudget>,
) -> AppResult<Json<CategoryBudget>> {
    if update.amount_cents.is_some_and(|a| a < 0) {
        return Err(AppError::Validation(
            "Budget amount must not be negative".into(),
        ));
    }

    let budget = state.store.update_budget(&id, update).await?;
    info!(id = %id, "Updated budget");
    Ok(Json(budget))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.store.delete_budget(&id).await?;
    info!(id = %id, "Deleted budget");
    Ok(StatusCode::NO_CONTENT)
}
