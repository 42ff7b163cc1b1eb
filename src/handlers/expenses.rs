use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::date_utils::parse_query_date;
use crate::error::{AppError, AppResult};
use crate::models::{Expense, NewExpense, UpdateExpense};
use crate::services::filtering;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilterParams {
    pub category_id: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl ExpenseFilterParams {
    /// Unparsable bounds degrade to "unbounded" rather than failing the
    /// request.
    fn from_bound(&self) -> Option<NaiveDate> {
        self.from_date.as_deref().and_then(parse_query_date)
    }

    fn to_bound(&self) -> Option<NaiveDate> {
        self.to_date.as_deref().and_then(parse_query_date)
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Query(params): Query<ExpenseFilterParams>,
) -> AppResult<Json<Vec<Expense>>> {
    debug!(owner_id = %owner_id, "Listing expenses");

    let expenses = state.store.list_expenses(&owner_id).await?;
    let expenses = filtering::filter_by_date_range(&expenses, params.from_bound(), params.to_bound());
    let expenses = filtering::filter_by_category(&expenses, params.category_id.as_deref());

    Ok(Json(expenses))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    Ok(Json(state.store.get_expense(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Path((owner_id, category_id)): Path<(String, String)>,
    Json(new): Json<NewExpense>,
) -> AppResult<Json<Expense>> {
    if new.amount_cents < 0 {
        return Err(AppError::Validation(
            "Expense amount must not be negative".into(),
        ));
    }

    let expense = state.store.create_expense(&owner_id, &category_id, new).await?;
    info!(id = %expense.id, owner_id = %owner_id, "Created expense");
    Ok(Json(expense))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    if update.amount_cents.is_some_and(|a| a < 0) {
        return Err(AppError::Validation(
            "Expense amount must not be negative".into(),
        ));
    }

    let expense = state.store.update_expense(&id, update).await?;
    info!(id = %id, "Updated expense");
    Ok(Json(expense))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.store.delete_expense(&id).await?;
    info!(id = %id, "Deleted expense");
    Ok(StatusCode::NO_CONTENT)
}
